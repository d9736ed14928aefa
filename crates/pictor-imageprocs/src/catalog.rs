/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The six stylistic filters
//!
//! Each filter is a fixed chain of primitives from this crate. Inputs are
//! first brought to RGB (gray replicated, alpha dropped, other spaces
//! converted) and every filter returns an RGB image of the same size.
//!
//! | Filter            | Pipeline |
//! |-------------------|----------|
//! | Watercolor Sketch | edge preserving smoothing, stylization, detail enhancement, Canny edges blended on top |
//! | Pencil Sketch     | gray, invert, gaussian blur, invert, color dodge divide, or domain transform pencil shading |
//! | Cartoon Effect    | ink mask from median + adaptive threshold over a bilateral filtered copy |
//! | Sepia Effect      | sepia color matrix then a vignette |
//! | HDR Effect        | CLAHE on LAB lightness, optional detail enhancement and saturation boost |
//! | Sharpen Effect    | unsharp mask, or a sharpen kernel on YCrCb luma or on every RGB channel |
//!
//! Every tuning constant lives in [`FilterOptions`], its `Default` gives the
//! stock look.
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::debug;
use pictor_image::colorspace::ColorSpace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;

use crate::bilateral_filter::bilateral_filter;
use crate::blend::linear_blend;
use crate::canny::gradient_edges;
use crate::clahe::local_contrast_enhance;
use crate::color_matrix::{color_matrix, ColorMatrix};
use crate::composite::{broadcast_gray, masked_combine};
use crate::convolve::{convolve, convolve_u8, Kernel};
use crate::divide::divide;
use crate::domain_transform::{
    detail_enhance, edge_preserving_filter, pencil_shade, stylize, DEFAULT_DETAIL_FACTOR
};
use crate::gaussian_blur::gaussian_blur;
use crate::hsv_adjust::adjust_saturation;
use crate::invert::invert;
use crate::median::median_blur;
use crate::threshold::adaptive_threshold;
use crate::vignette::apply_vignette;

/// A named filter of the catalog
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum Filter {
    Watercolor,
    PencilSketch,
    Cartoon,
    Sepia,
    Hdr,
    Sharpen
}

impl Filter {
    /// Every filter, in menu order
    pub const ALL: [Filter; 6] = [
        Filter::Watercolor,
        Filter::PencilSketch,
        Filter::Cartoon,
        Filter::Sepia,
        Filter::Hdr,
        Filter::Sharpen
    ];

    /// The display label of this filter
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Filter::Watercolor => "Watercolor Sketch",
            Filter::PencilSketch => "Pencil Sketch",
            Filter::Cartoon => "Cartoon Effect",
            Filter::Sepia => "Sepia Effect",
            Filter::Hdr => "HDR Effect",
            Filter::Sharpen => "Sharpen Effect"
        }
    }

    /// A lowercase name without spaces, usable in file names
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Filter::Watercolor => "watercolor",
            Filter::PencilSketch => "pencil_sketch",
            Filter::Cartoon => "cartoon",
            Filter::Sepia => "sepia",
            Filter::Hdr => "hdr",
            Filter::Sharpen => "sharpen"
        }
    }

    /// Apply this filter with the default options
    ///
    /// # Errors
    /// Any error of the underlying primitives, which for valid images only
    /// happens with unusable options
    pub fn apply(self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        self.apply_with_options(image, &FilterOptions::default())
    }

    /// Apply this filter with custom tuning
    ///
    /// # Errors
    /// `InvalidParameter` and friends if the options are out of range
    pub fn apply_with_options(
        self, image: &PixelBuffer, options: &FilterOptions
    ) -> Result<PixelBuffer, ImageErrors> {
        let (width, height) = image.dimensions();
        debug!("Applying {} to {width}x{height} image", self.name());

        let rgb = image.to_rgb()?;

        match self {
            Filter::Watercolor => watercolor(&rgb, &options.watercolor),
            Filter::PencilSketch => pencil_sketch(&rgb, &options.pencil_sketch),
            Filter::Cartoon => cartoon(&rgb, &options.cartoon),
            Filter::Sepia => sepia(&rgb, &options.sepia),
            Filter::Hdr => hdr(&rgb, &options.hdr),
            Filter::Sharpen => sharpen(&rgb, &options.sharpen)
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Filter {
    type Err = ImageErrors;

    /// Parse a filter name
    ///
    /// Matching ignores case, treats `_` and `-` as spaces and accepts both
    /// the short names and the display labels
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .trim()
            .to_lowercase()
            .replace(['_', '-'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");

        match normalized.as_str() {
            "watercolor" | "watercolor sketch" => Ok(Filter::Watercolor),
            "pencil" | "pencil sketch" => Ok(Filter::PencilSketch),
            "cartoon" | "cartoon effect" => Ok(Filter::Cartoon),
            "sepia" | "sepia effect" => Ok(Filter::Sepia),
            "hdr" | "hdr effect" => Ok(Filter::Hdr),
            "sharpen" | "sharpen effect" => Ok(Filter::Sharpen),
            _ => Err(ImageErrors::UnknownFilter(s.to_string()))
        }
    }
}

/// Tuning of the watercolor filter
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct WatercolorOptions {
    pub smooth_sigma_s:  f32,
    pub smooth_sigma_r:  f32,
    pub stylize_sigma_s: f32,
    pub stylize_sigma_r: f32,
    pub detail_enhance:  bool,
    pub detail_sigma_s:  f32,
    pub detail_sigma_r:  f32,
    pub detail_factor:   f32,
    pub canny_low:       f32,
    pub canny_high:      f32,
    pub stylized_weight: f32,
    pub edge_weight:     f32
}

impl Default for WatercolorOptions {
    fn default() -> Self {
        WatercolorOptions {
            smooth_sigma_s:  64.0,
            smooth_sigma_r:  0.6,
            stylize_sigma_s: 150.0,
            stylize_sigma_r: 0.25,
            detail_enhance:  true,
            detail_sigma_s:  10.0,
            detail_sigma_r:  0.15,
            detail_factor:   DEFAULT_DETAIL_FACTOR,
            canny_low:       100.0,
            canny_high:      200.0,
            stylized_weight: 0.9,
            edge_weight:     0.3
        }
    }
}

/// How the pencil sketch filter draws
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum PencilMethod {
    /// Divide the gray image by its blurred negative
    #[default]
    ColorDodge,
    /// Strokes along the gradients of domain transform smoothed lightness,
    /// see [`PencilShade`](crate::domain_transform::PencilShade)
    DomainTransform {
        sigma_s:      f32,
        sigma_r:      f32,
        shade_factor: f32
    }
}

impl PencilMethod {
    /// Domain transform drawing with the stock parameters
    #[must_use]
    pub const fn domain_transform() -> PencilMethod {
        PencilMethod::DomainTransform {
            sigma_s:      50.0,
            sigma_r:      0.07,
            shade_factor: 0.1
        }
    }
}

/// Tuning of the pencil sketch filter
///
/// The blur and scale fields only apply to [`PencilMethod::ColorDodge`]
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct PencilSketchOptions {
    pub method:     PencilMethod,
    /// Gaussian kernel size, odd, or 0 to derive it from the sigma
    pub blur_size:  usize,
    /// Gaussian sigma, `<= 0` derives it from the size
    pub blur_sigma: f32,
    /// Color dodge scale
    pub scale:      f32
}

impl Default for PencilSketchOptions {
    fn default() -> Self {
        PencilSketchOptions {
            method:     PencilMethod::ColorDodge,
            blur_size:  21,
            blur_sigma: 0.0,
            scale:      256.0
        }
    }
}

/// Tuning of the cartoon filter
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct CartoonOptions {
    pub median_aperture:    usize,
    pub block_size:         usize,
    pub c:                  f32,
    pub bilateral_diameter: i32,
    pub sigma_color:        f32,
    pub sigma_space:        f32
}

impl Default for CartoonOptions {
    fn default() -> Self {
        CartoonOptions {
            median_aperture:    5,
            block_size:         9,
            c:                  9.0,
            bilateral_diameter: 9,
            sigma_color:        300.0,
            sigma_space:        300.0
        }
    }
}

/// Tuning of the sepia filter
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct SepiaOptions {
    pub vignette:       bool,
    pub vignette_sigma: f32
}

impl Default for SepiaOptions {
    fn default() -> Self {
        SepiaOptions {
            vignette:       true,
            vignette_sigma: 200.0
        }
    }
}

/// Tuning of the HDR filter
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct HdrOptions {
    pub clip_limit:       f32,
    pub tiles:            (usize, usize),
    pub detail_enhance:   bool,
    pub detail_sigma_s:   f32,
    pub detail_sigma_r:   f32,
    pub detail_factor:    f32,
    pub saturation_boost: bool,
    pub saturation:       i16
}

impl HdrOptions {
    /// Only equalize the lightness, no detail or saturation boost
    #[must_use]
    pub fn clahe_only() -> HdrOptions {
        HdrOptions {
            detail_enhance:   false,
            saturation_boost: false,
            ..HdrOptions::default()
        }
    }
}

impl Default for HdrOptions {
    fn default() -> Self {
        HdrOptions {
            clip_limit:       3.0,
            tiles:            (8, 8),
            detail_enhance:   true,
            detail_sigma_s:   15.0,
            detail_sigma_r:   0.3,
            detail_factor:    DEFAULT_DETAIL_FACTOR,
            saturation_boost: true,
            saturation:       30
        }
    }
}

/// How the sharpen filter sharpens
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum SharpenMethod {
    /// `amount * image + (1 - amount) * blurred`
    UnsharpMask { sigma: f32, amount: f32 },
    /// 3x3 sharpen kernel on the luma of YCrCb, chroma untouched
    LumaKernel,
    /// 3x3 sharpen kernel on every RGB channel
    RgbKernel
}

impl Default for SharpenMethod {
    fn default() -> Self {
        SharpenMethod::UnsharpMask {
            sigma:  3.0,
            amount: 1.5
        }
    }
}

/// Tuning of the sharpen filter
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct SharpenOptions {
    pub method: SharpenMethod
}

/// Every tuning constant of the catalog
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-support", serde(default))]
pub struct FilterOptions {
    pub watercolor:    WatercolorOptions,
    pub pencil_sketch: PencilSketchOptions,
    pub cartoon:       CartoonOptions,
    pub sepia:         SepiaOptions,
    pub hdr:           HdrOptions,
    pub sharpen:       SharpenOptions
}

fn watercolor(rgb: &PixelBuffer, opts: &WatercolorOptions) -> Result<PixelBuffer, ImageErrors> {
    debug!("Watercolor: edge preserving smoothing");
    let smooth = edge_preserving_filter(rgb, opts.smooth_sigma_s, opts.smooth_sigma_r)?;

    debug!("Watercolor: stylization");
    let mut stylized = stylize(&smooth, opts.stylize_sigma_s, opts.stylize_sigma_r)?;

    if opts.detail_enhance {
        debug!("Watercolor: detail enhancement");
        stylized = detail_enhance(
            &stylized,
            opts.detail_sigma_s,
            opts.detail_sigma_r,
            opts.detail_factor
        )?;
    }
    debug!("Watercolor: edge overlay");
    let gray = rgb.convert_color(ColorSpace::Luma)?;
    let edges = broadcast_gray(&gradient_edges(&gray, opts.canny_low, opts.canny_high)?)?;

    linear_blend(&stylized, &edges, opts.stylized_weight, opts.edge_weight, 0.0)
}

fn pencil_sketch(rgb: &PixelBuffer, opts: &PencilSketchOptions) -> Result<PixelBuffer, ImageErrors> {
    if let PencilMethod::DomainTransform {
        sigma_s,
        sigma_r,
        shade_factor
    } = opts.method
    {
        debug!("Pencil sketch: domain transform shading");
        return pencil_shade(rgb, sigma_s, sigma_r, shade_factor)?.convert_color(ColorSpace::RGB);
    }
    debug!("Pencil sketch: blurring the negative");
    let gray = rgb.convert_color(ColorSpace::Luma)?;
    let blurred = gaussian_blur(&invert(&gray)?, opts.blur_size, opts.blur_sigma)?;

    debug!("Pencil sketch: color dodge");
    let sketch = divide(&gray, &invert(&blurred)?, opts.scale)?;

    sketch.convert_color(ColorSpace::RGB)
}

/// The black ink lines of the cartoon filter
///
/// Returns a single channel image that is 255 on flat areas and 0 on
/// edges. Any input is accepted, it is brought to gray first.
///
/// # Errors
/// `InvalidParameter` if the aperture or block size is even or too small
pub fn cartoon_edge_mask(
    image: &PixelBuffer, opts: &CartoonOptions
) -> Result<PixelBuffer, ImageErrors> {
    let gray = image.to_rgb()?.convert_color(ColorSpace::Luma)?;
    let smooth = median_blur(&gray, opts.median_aperture)?;

    adaptive_threshold(&smooth, opts.block_size, opts.c)
}

fn cartoon(rgb: &PixelBuffer, opts: &CartoonOptions) -> Result<PixelBuffer, ImageErrors> {
    debug!("Cartoon: ink mask");
    let mask = cartoon_edge_mask(rgb, opts)?;

    debug!("Cartoon: bilateral color smoothing");
    let color = bilateral_filter(
        rgb,
        opts.bilateral_diameter,
        opts.sigma_color,
        opts.sigma_space
    )?;

    masked_combine(&color, &color, &mask)
}

fn sepia(rgb: &PixelBuffer, opts: &SepiaOptions) -> Result<PixelBuffer, ImageErrors> {
    debug!("Sepia: color matrix");
    let toned = color_matrix(rgb, &ColorMatrix::sepia())?;

    if !opts.vignette {
        return Ok(toned);
    }
    debug!("Sepia: vignette");
    apply_vignette(&toned, opts.vignette_sigma)
}

fn hdr(rgb: &PixelBuffer, opts: &HdrOptions) -> Result<PixelBuffer, ImageErrors> {
    let (width, height) = rgb.dimensions();

    debug!("HDR: equalizing lightness");
    let mut planes = rgb.convert_color(ColorSpace::LAB)?.channels_vec();

    let lightness = PixelBuffer::from_u8(&planes[0], width, height, ColorSpace::Luma)?;
    planes[0] = local_contrast_enhance(&lightness, opts.clip_limit, opts.tiles)?.into_pixels();

    let equalized =
        PixelBuffer::from_channels(&planes, width, height, ColorSpace::LAB)?.convert_color(ColorSpace::RGB)?;

    let detailed = if opts.detail_enhance {
        debug!("HDR: detail enhancement");
        detail_enhance(
            &equalized,
            opts.detail_sigma_s,
            opts.detail_sigma_r,
            opts.detail_factor
        )?
    } else {
        equalized
    };

    if !opts.saturation_boost {
        return Ok(detailed);
    }
    debug!("HDR: saturation boost");
    let hsv = detailed.convert_color(ColorSpace::HSV)?;

    adjust_saturation(&hsv, opts.saturation)?.convert_color(ColorSpace::RGB)
}

fn sharpen(rgb: &PixelBuffer, opts: &SharpenOptions) -> Result<PixelBuffer, ImageErrors> {
    match opts.method {
        SharpenMethod::UnsharpMask { sigma, amount } => {
            debug!("Sharpen: unsharp mask, sigma {sigma}, amount {amount}");
            let blurred = gaussian_blur(rgb, 0, sigma)?;

            linear_blend(rgb, &blurred, amount, 1.0 - amount, 0.0)
        }
        SharpenMethod::LumaKernel => {
            debug!("Sharpen: kernel on luma");
            let (width, height) = rgb.dimensions();
            let mut planes = rgb.convert_color(ColorSpace::YCrCb)?.channels_vec();

            planes[0] = convolve_u8(&planes[0], width, height, &Kernel::sharpen());

            PixelBuffer::from_channels(&planes, width, height, ColorSpace::YCrCb)?
                .convert_color(ColorSpace::RGB)
        }
        SharpenMethod::RgbKernel => {
            debug!("Sharpen: kernel on every channel");
            convolve(rgb, &Kernel::sharpen())
        }
    }
}

/// Apply a filter by name with default options
///
/// # Example
/// ```
/// use pictor_image::colorspace::ColorSpace;
/// use pictor_image::errors::ImageErrors;
/// use pictor_image::image::PixelBuffer;
/// use pictor_imageprocs::catalog::apply_filter;
///
/// let image = PixelBuffer::fill(40, ColorSpace::Luma, 32, 32)?;
/// let sharp = apply_filter(&image, "sharpen")?;
/// assert_eq!(sharp.colorspace(), ColorSpace::RGB);
///
/// assert!(matches!(apply_filter(&image, "Oil Painting"), Err(ImageErrors::UnknownFilter(_))));
/// # Ok::<(), ImageErrors>(())
/// ```
///
/// # Errors
/// - `UnknownFilter` if the name is not in the catalog
/// - Any error of the filter itself
pub fn apply_filter(image: &PixelBuffer, name: &str) -> Result<PixelBuffer, ImageErrors> {
    name.parse::<Filter>()?.apply(image)
}

/// Apply a filter by name with custom options
///
/// # Errors
/// See [`apply_filter`]
pub fn apply_filter_with_options(
    image: &PixelBuffer, name: &str, options: &FilterOptions
) -> Result<PixelBuffer, ImageErrors> {
    name.parse::<Filter>()?.apply_with_options(image, options)
}

/// Render every filter of the catalog, in menu order
///
/// # Errors
/// The first error any filter returns
pub fn apply_all(
    image: &PixelBuffer, options: &FilterOptions
) -> Result<Vec<(Filter, PixelBuffer)>, ImageErrors> {
    Filter::ALL
        .iter()
        .map(|filter| Ok((*filter, filter.apply_with_options(image, options)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::errors::ImageErrors;
    use pictor_image::image::PixelBuffer;

    use crate::catalog::*;

    fn random_rgb(width: usize, height: usize, seed: u64) -> PixelBuffer {
        let mut pixels = vec![0; width * height * 3];
        nanorand::WyRand::new_seed(seed).fill(&mut pixels);
        PixelBuffer::from_vec(pixels, width, height, ColorSpace::RGB).unwrap()
    }

    #[test]
    fn parse_names() {
        for filter in Filter::ALL {
            assert_eq!(filter.name().parse::<Filter>().unwrap(), filter);
            assert_eq!(filter.slug().parse::<Filter>().unwrap(), filter);
            assert_eq!(filter.name().to_uppercase().parse::<Filter>().unwrap(), filter);
        }
        assert_eq!("pencil-sketch".parse::<Filter>().unwrap(), Filter::PencilSketch);
        assert_eq!("  Watercolor ".parse::<Filter>().unwrap(), Filter::Watercolor);
        assert!(matches!(
            "Oil Painting".parse::<Filter>(),
            Err(ImageErrors::UnknownFilter(name)) if name == "Oil Painting"
        ));
    }

    #[test]
    fn every_filter_keeps_dimensions() {
        let image = random_rgb(37, 29, 5);
        let results = apply_all(&image, &FilterOptions::default()).unwrap();

        assert_eq!(results.len(), 6);
        for (filter, out) in results {
            assert_eq!(out.dimensions(), (37, 29), "{filter}");
            assert_eq!(out.colorspace(), ColorSpace::RGB, "{filter}");
        }
    }

    #[test]
    fn input_is_left_untouched() {
        let image = random_rgb(16, 16, 7);
        let copy = image.clone();

        for filter in Filter::ALL {
            let _ = filter.apply(&image).unwrap();
        }
        assert_eq!(image, copy);
    }

    #[test]
    fn gray_and_rgba_inputs_are_accepted() {
        let gray = PixelBuffer::fill(100, ColorSpace::Luma, 12, 10).unwrap();
        let rgba = PixelBuffer::fill(100, ColorSpace::RGBA, 12, 10).unwrap();

        for filter in Filter::ALL {
            assert_eq!(filter.apply(&gray).unwrap().channels(), 3);
            assert_eq!(filter.apply(&rgba).unwrap().channels(), 3);
        }
    }

    #[test]
    fn sepia_on_white_stays_white_in_the_centre() {
        let image = PixelBuffer::fill(255, ColorSpace::RGB, 21, 21).unwrap();
        let out = apply_filter(&image, "Sepia Effect").unwrap();

        assert_eq!(out.pixel(10, 10), &[255, 255, 255]);
    }

    #[test]
    fn pencil_sketch_of_flat_image_is_white() {
        // dividing a value by itself scaled by 256 saturates
        let image = PixelBuffer::fill(128, ColorSpace::RGB, 30, 30).unwrap();
        let out = apply_filter(&image, "pencil sketch").unwrap();
        assert!(out.pixels().iter().all(|x| *x == 255));
    }

    #[test]
    fn cartoon_mask_is_binary() {
        let image = PixelBuffer::from_fn(40, 40, ColorSpace::RGB, |x, y, pix| {
            let v = if (x / 8 + y / 8) % 2 == 0 { 30 } else { 220 };
            pix.fill(v);
        })
        .unwrap();
        let mask = cartoon_edge_mask(&image, &CartoonOptions::default()).unwrap();

        assert!(mask.pixels().iter().all(|x| *x == 0 || *x == 255));
        assert!(mask.pixels().contains(&0));
        assert!(mask.pixels().contains(&255));
    }

    #[test]
    fn sharpen_methods() {
        let image = random_rgb(20, 20, 11);
        let kernel = FilterOptions {
            sharpen: SharpenOptions {
                method: SharpenMethod::LumaKernel
            },
            ..FilterOptions::default()
        };
        let a = Filter::Sharpen.apply(&image).unwrap();
        let b = Filter::Sharpen.apply_with_options(&image, &kernel).unwrap();

        assert_eq!(a.dimensions(), b.dimensions());
        assert_ne!(a, b);
    }

    #[test]
    fn rgb_kernel_sharpens_each_channel() {
        let image = random_rgb(20, 20, 13);
        let options = FilterOptions {
            sharpen: SharpenOptions {
                method: SharpenMethod::RgbKernel
            },
            ..FilterOptions::default()
        };
        let out = Filter::Sharpen.apply_with_options(&image, &options).unwrap();

        for (k, plane) in out.channels_vec().iter().enumerate() {
            let expected = convolve_u8(&image.channels_vec()[k], 20, 20, &Kernel::sharpen());
            assert_eq!(plane, &expected);
        }
    }

    #[test]
    fn hdr_clahe_only_matches_plain_equalization() {
        let image = random_rgb(64, 48, 17);
        let options = FilterOptions {
            hdr: HdrOptions::clahe_only(),
            ..FilterOptions::default()
        };
        let out = Filter::Hdr.apply_with_options(&image, &options).unwrap();

        let mut planes = image.convert_color(ColorSpace::LAB).unwrap().channels_vec();
        let lightness = PixelBuffer::from_u8(&planes[0], 64, 48, ColorSpace::Luma).unwrap();
        planes[0] = local_contrast_enhance(&lightness, 3.0, (8, 8)).unwrap().into_pixels();
        let expected = PixelBuffer::from_channels(&planes, 64, 48, ColorSpace::LAB)
            .unwrap()
            .convert_color(ColorSpace::RGB)
            .unwrap();

        assert_eq!(out, expected);
    }

    #[test]
    fn pencil_domain_transform_method() {
        let options = FilterOptions {
            pencil_sketch: PencilSketchOptions {
                method: PencilMethod::domain_transform(),
                ..PencilSketchOptions::default()
            },
            ..FilterOptions::default()
        };
        let flat = PixelBuffer::fill(90, ColorSpace::RGB, 24, 16).unwrap();
        let out = Filter::PencilSketch.apply_with_options(&flat, &options).unwrap();

        assert_eq!(out.colorspace(), ColorSpace::RGB);
        assert!(out.pixels().iter().all(|v| *v == out.pixels()[0]));

        let step = PixelBuffer::from_fn(24, 16, ColorSpace::RGB, |x, _, pix| {
            pix.fill(if x < 12 { 20 } else { 230 });
        })
        .unwrap();
        let out = Filter::PencilSketch.apply_with_options(&step, &options).unwrap();
        let darkest = (9..15).map(|x| out.pixel(x, 8)[0]).min().unwrap();

        assert!(darkest < 30);
        assert!(out.pixel(1, 8)[0] > 200);
    }

    #[test]
    fn bad_options_are_reported() {
        let image = random_rgb(10, 10, 1);
        let mut options = FilterOptions::default();
        options.cartoon.median_aperture = 4;

        assert!(matches!(
            Filter::Cartoon.apply_with_options(&image, &options),
            Err(ImageErrors::InvalidParameter(_))
        ));
    }
}
