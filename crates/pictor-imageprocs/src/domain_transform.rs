/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Edge preserving smoothing with the domain transform
//!
//! Every row and column is treated as a 1-D signal living in a warped
//! domain where the distance between two neighbours is
//! `1 + sigma_s / sigma_r * sum(|I(x) - I(x-1)|)` over all color channels.
//! A first order recursive filter run in that domain smooths flat areas
//! while barely crossing strong edges.
//!
//! The filter alternates horizontal and vertical passes for a fixed number
//! of iterations, halving the spatial sigma each time so that the artifacts
//! of one pass are removed by the next.
//!
//! Three operations are built on it
//! - [`EdgePreservingFilter`]: the plain smoothing
//! - [`Stylization`]: smoothing followed by darkening along gradients
//! - [`DetailEnhance`]: boosts the detail layer of the lightness channel
//! - [`PencilShade`]: gray pencil strokes along the gradients of the smoothed lightness
use log::trace;
use pictor_image::colorspace::ColorSpace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::sobel::sobel_f32;
use crate::utils::{for_each_row_band, round_u8};

const ITERATIONS: usize = 3;

/// Default factor detail is re-injected with
pub const DEFAULT_DETAIL_FACTOR: f32 = 3.0;

fn check_sigmas(sigma_s: f32, sigma_r: f32) -> Result<(), ImageErrors> {
    for (name, value) in [("sigma_s", sigma_s), ("sigma_r", sigma_r)] {
        if !(value > 0.0 && value.is_finite()) {
            return Err(ImageErrors::InvalidParameter(format!(
                "{name} must be positive, found {value}"
            )));
        }
    }
    Ok(())
}

/// Run the recursive domain transform filter in place
///
/// `data` holds `channels` interleaved samples per pixel, nominally in
/// `[0,1]`. The domain is derived once from the unfiltered input.
///
/// Parameters are assumed to be validated.
pub fn recursive_filter(
    data: &mut [f32], width: usize, height: usize, channels: usize, sigma_s: f32, sigma_r: f32
) {
    let ratio = sigma_s / sigma_r;
    let stride = width * channels;

    // distance to the previous pixel on the same row / column
    let mut dhdx = vec![1.0_f32; width * height];
    let mut dvdy = vec![1.0_f32; width * height];

    for y in 0..height {
        for x in 0..width {
            let here = &data[y * stride + x * channels..][..channels];

            if x > 0 {
                let left = &data[y * stride + (x - 1) * channels..][..channels];
                let diff: f32 = here.iter().zip(left).map(|(a, b)| (a - b).abs()).sum();
                dhdx[y * width + x] = 1.0 + ratio * diff;
            }
            if y > 0 {
                let up = &data[(y - 1) * stride + x * channels..][..channels];
                let diff: f32 = here.iter().zip(up).map(|(a, b)| (a - b).abs()).sum();
                dvdy[y * width + x] = 1.0 + ratio * diff;
            }
        }
    }

    let n = ITERATIONS as i32;
    let denominator = (4.0_f32.powi(n) - 1.0).sqrt();

    for i in 0..n {
        let sigma_h = sigma_s * 3.0_f32.sqrt() * 2.0_f32.powi(n - i - 1) / denominator;
        let a = (-(2.0_f32.sqrt()) / sigma_h).exp();

        trace!("Domain transform iteration {i}, sigma_h {sigma_h}");

        // horizontal, rows are independent
        for_each_row_band(data, stride, |first_row, band| {
            for (r, row) in band.chunks_exact_mut(stride).enumerate() {
                let d = &dhdx[(first_row + r) * width..][..width];
                horizontal_pass(row, d, channels, a);
            }
        });
        vertical_pass(data, &dvdy, width, height, channels, a);
    }
}

fn horizontal_pass(row: &mut [f32], d: &[f32], channels: usize, a: f32) {
    let width = d.len();

    for x in 1..width {
        let v = a.powf(d[x]);
        for k in 0..channels {
            let prev = row[(x - 1) * channels + k];
            let cur = &mut row[x * channels + k];
            *cur += v * (prev - *cur);
        }
    }
    for x in (0..width.saturating_sub(1)).rev() {
        let v = a.powf(d[x + 1]);
        for k in 0..channels {
            let next = row[(x + 1) * channels + k];
            let cur = &mut row[x * channels + k];
            *cur += v * (next - *cur);
        }
    }
}

fn vertical_pass(data: &mut [f32], d: &[f32], width: usize, height: usize, channels: usize, a: f32) {
    let stride = width * channels;

    for y in 1..height {
        let (above, below) = data.split_at_mut(y * stride);
        let prev = &above[(y - 1) * stride..];
        let cur = &mut below[..stride];

        for (x, (c, p)) in cur
            .chunks_exact_mut(channels)
            .zip(prev.chunks_exact(channels))
            .enumerate()
        {
            let v = a.powf(d[y * width + x]);
            for (c, p) in c.iter_mut().zip(p) {
                *c += v * (p - *c);
            }
        }
    }
    for y in (0..height.saturating_sub(1)).rev() {
        let (above, below) = data.split_at_mut((y + 1) * stride);
        let cur = &mut above[y * stride..];
        let next = &below[..stride];

        for (x, (c, n)) in cur
            .chunks_exact_mut(channels)
            .zip(next.chunks_exact(channels))
            .enumerate()
        {
            let v = a.powf(d[(y + 1) * width + x]);
            for (c, n) in c.iter_mut().zip(n) {
                *c += v * (n - *c);
            }
        }
    }
}

/// Color samples of `image` scaled to `[0,1]`, alpha excluded
fn color_samples(image: &PixelBuffer) -> (Vec<f32>, usize) {
    let channels = image.channels();
    let colors = image.colorspace().color_components();

    let samples = image
        .pixels()
        .chunks_exact(channels)
        .flat_map(|pix| pix[..colors].iter().map(|v| f32::from(*v) / 255.0))
        .collect();

    (samples, colors)
}

/// Write `[0,1]` color samples back over a copy of `image`
fn with_color_samples(image: &PixelBuffer, samples: &[f32]) -> Result<PixelBuffer, ImageErrors> {
    let (width, height) = image.dimensions();
    let channels = image.channels();
    let colors = image.colorspace().color_components();

    let mut pixels = image.pixels().to_vec();

    for (pix, src) in pixels
        .chunks_exact_mut(channels)
        .zip(samples.chunks_exact(colors))
    {
        for (p, s) in pix.iter_mut().zip(src) {
            *p = round_u8(s * 255.0);
        }
    }
    PixelBuffer::from_vec(pixels, width, height, image.colorspace())
}

/// Edge preserving smoothing
///
/// # Arguments
/// - sigma_s: Spatial extent of the smoothing, in pixels
/// - sigma_r: How large a color difference is treated as an edge, in `[0,1]` units
#[derive(Copy, Clone, Debug)]
pub struct EdgePreservingFilter {
    sigma_s: f32,
    sigma_r: f32
}

impl EdgePreservingFilter {
    #[must_use]
    pub fn new(sigma_s: f32, sigma_r: f32) -> EdgePreservingFilter {
        EdgePreservingFilter { sigma_s, sigma_r }
    }
}

impl OperationsTrait for EdgePreservingFilter {
    fn name(&self) -> &'static str {
        "Edge preserving filter"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        check_sigmas(self.sigma_s, self.sigma_r)?;

        let (width, height) = image.dimensions();
        let (mut samples, colors) = color_samples(image);

        recursive_filter(&mut samples, width, height, colors, self.sigma_s, self.sigma_r);

        with_color_samples(image, &samples)
    }
}

/// Smooth heavily then darken along color gradients
///
/// The gradient magnitude of the smoothed image is summed over its color
/// channels, normalized to `[0,1]` and every channel is multiplied by one
/// minus it. Outlines come out dark, flat regions keep their color.
#[derive(Copy, Clone, Debug)]
pub struct Stylization {
    sigma_s: f32,
    sigma_r: f32
}

impl Stylization {
    #[must_use]
    pub fn new(sigma_s: f32, sigma_r: f32) -> Stylization {
        Stylization { sigma_s, sigma_r }
    }
}

impl OperationsTrait for Stylization {
    fn name(&self) -> &'static str {
        "Stylization"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        check_sigmas(self.sigma_s, self.sigma_r)?;

        let (width, height) = image.dimensions();
        let (mut samples, colors) = color_samples(image);

        recursive_filter(&mut samples, width, height, colors, self.sigma_s, self.sigma_r);

        let mut magnitude = vec![0.0_f32; width * height];

        for k in 0..colors {
            let plane: Vec<f32> = samples.iter().skip(k).step_by(colors).copied().collect();
            let (dx, dy) = sobel_f32(&plane, width, height);

            for ((m, x), y) in magnitude.iter_mut().zip(&dx).zip(&dy) {
                *m += (x * x + y * y).sqrt();
            }
        }
        let min = magnitude.iter().copied().fold(f32::INFINITY, f32::min);
        let max = magnitude.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let range = max - min;

        for (pix, m) in samples.chunks_exact_mut(colors).zip(&magnitude) {
            let keep = if range > 0.0 {
                1.0 - (m - min) / range
            } else {
                1.0
            };
            pix.iter_mut().for_each(|v| *v *= keep);
        }
        with_color_samples(image, &samples)
    }
}

/// Boost fine detail in the lightness channel
///
/// The LAB lightness is split into an edge preserving base layer and a
/// detail layer (`L - base`), then recombined as `base + factor * detail`.
/// Chroma is untouched. Accepts three channel images, read as RGB, and RGBA
/// whose alpha is carried through.
#[derive(Copy, Clone, Debug)]
pub struct DetailEnhance {
    sigma_s: f32,
    sigma_r: f32,
    factor:  f32
}

impl DetailEnhance {
    #[must_use]
    pub fn new(sigma_s: f32, sigma_r: f32, factor: f32) -> DetailEnhance {
        DetailEnhance {
            sigma_s,
            sigma_r,
            factor
        }
    }
}

impl OperationsTrait for DetailEnhance {
    fn name(&self) -> &'static str {
        "Detail enhance"
    }

    fn supported_channels(&self) -> &'static [usize] {
        &[3, 4]
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        check_sigmas(self.sigma_s, self.sigma_r)?;

        if !self.factor.is_finite() {
            return Err(ImageErrors::InvalidParameter(format!(
                "Detail factor must be finite, found {}",
                self.factor
            )));
        }
        let (width, height) = image.dimensions();

        let rgb = match image.colorspace() {
            ColorSpace::RGB | ColorSpace::RGBA => image.to_rgb()?,
            // any other three channel layout is taken as RGB samples
            _ => PixelBuffer::from_u8(image.pixels(), width, height, ColorSpace::RGB)?
        };
        let lab = rgb.convert_color(ColorSpace::LAB)?;
        let mut planes = lab.channels_vec();

        let lightness: Vec<f32> = planes[0].iter().map(|v| f32::from(*v) / 255.0).collect();
        let mut base = lightness.clone();

        recursive_filter(&mut base, width, height, 1, self.sigma_s, self.sigma_r);

        for ((out, l), b) in planes[0].iter_mut().zip(&lightness).zip(&base) {
            *out = round_u8((b + self.factor * (l - b)) * 255.0);
        }
        let enhanced = PixelBuffer::from_channels(&planes, width, height, ColorSpace::LAB)?
            .convert_color(ColorSpace::RGB)?;

        if !image.colorspace().has_alpha() {
            return enhanced.with_colorspace(image.colorspace());
        }
        let channels = image.channels();
        let mut pixels = image.pixels().to_vec();

        for (pix, src) in pixels
            .chunks_exact_mut(channels)
            .zip(enhanced.pixels().chunks_exact(3))
        {
            pix[..3].copy_from_slice(src);
        }
        PixelBuffer::from_vec(pixels, width, height, image.colorspace())
    }
}

/// Gray pencil drawing from the smoothed lightness
///
/// The LAB lightness is smoothed with the recursive filter and its Sobel
/// magnitude, scaled so the strongest gradient is 1, becomes the stroke.
/// Paper is white, strokes darken towards black, and `shade_factor` mixes
/// in that fraction of the smoothed tone:
///
/// `out = (1 - stroke) * ((1 - shade_factor) + shade_factor * base)`
///
/// The result is a single channel image.
#[derive(Copy, Clone, Debug)]
pub struct PencilShade {
    sigma_s:      f32,
    sigma_r:      f32,
    shade_factor: f32
}

impl PencilShade {
    #[must_use]
    pub fn new(sigma_s: f32, sigma_r: f32, shade_factor: f32) -> PencilShade {
        PencilShade {
            sigma_s,
            sigma_r,
            shade_factor
        }
    }
}

impl OperationsTrait for PencilShade {
    fn name(&self) -> &'static str {
        "Pencil shade"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        check_sigmas(self.sigma_s, self.sigma_r)?;

        if !(0.0..=1.0).contains(&self.shade_factor) {
            return Err(ImageErrors::InvalidParameter(format!(
                "Shade factor must be in [0,1], found {}",
                self.shade_factor
            )));
        }
        let (width, height) = image.dimensions();

        let lab = image.to_rgb()?.convert_color(ColorSpace::LAB)?;
        let mut base: Vec<f32> = lab.channels_vec()[0]
            .iter()
            .map(|v| f32::from(*v) / 255.0)
            .collect();

        recursive_filter(&mut base, width, height, 1, self.sigma_s, self.sigma_r);

        let (dx, dy) = sobel_f32(&base, width, height);
        let magnitude: Vec<f32> = dx
            .iter()
            .zip(&dy)
            .map(|(x, y)| (x * x + y * y).sqrt())
            .collect();
        let max = magnitude.iter().copied().fold(0.0_f32, f32::max);

        trace!("Pencil shade, strongest gradient {max}");

        let pixels = magnitude
            .iter()
            .zip(&base)
            .map(|(m, b)| {
                let stroke = if max > 0.0 { m / max } else { 0.0 };
                let paper = (1.0 - self.shade_factor) + self.shade_factor * b;
                round_u8((1.0 - stroke) * paper * 255.0)
            })
            .collect();

        PixelBuffer::from_vec(pixels, width, height, ColorSpace::Luma)
    }
}

/// Smooth an image while keeping edges sharp
///
/// # Errors
/// `InvalidParameter` if a sigma is not positive
pub fn edge_preserving_filter(
    image: &PixelBuffer, sigma_s: f32, sigma_r: f32
) -> Result<PixelBuffer, ImageErrors> {
    EdgePreservingFilter::new(sigma_s, sigma_r).execute(image)
}

/// Painterly abstraction with dark outlines
///
/// # Errors
/// `InvalidParameter` if a sigma is not positive
pub fn stylize(image: &PixelBuffer, sigma_s: f32, sigma_r: f32) -> Result<PixelBuffer, ImageErrors> {
    Stylization::new(sigma_s, sigma_r).execute(image)
}

/// Re-inject the lightness detail layer at `factor`
///
/// # Errors
/// - `InvalidParameter` if a sigma is not positive
/// - `InvalidChannelCount` if the image does not have 3 or 4 channels
pub fn detail_enhance(
    image: &PixelBuffer, sigma_s: f32, sigma_r: f32, factor: f32
) -> Result<PixelBuffer, ImageErrors> {
    DetailEnhance::new(sigma_s, sigma_r, factor).execute(image)
}

/// Pencil drawing of an image, see [`PencilShade`]
///
/// # Errors
/// `InvalidParameter` if a sigma is not positive or the shade factor is
/// outside `[0,1]`
pub fn pencil_shade(
    image: &PixelBuffer, sigma_s: f32, sigma_r: f32, shade_factor: f32
) -> Result<PixelBuffer, ImageErrors> {
    PencilShade::new(sigma_s, sigma_r, shade_factor).execute(image)
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::errors::ImageErrors;
    use pictor_image::image::PixelBuffer;

    use crate::domain_transform::{detail_enhance, edge_preserving_filter, pencil_shade, stylize};

    fn noisy_halves(seed: u64) -> PixelBuffer {
        let mut noise = vec![0_u8; 40 * 30];
        nanorand::WyRand::new_seed(seed).fill(&mut noise);

        PixelBuffer::from_fn(40, 30, ColorSpace::RGB, |x, y, pix| {
            let base: i16 = if x < 20 { 40 } else { 210 };
            let v = (base + i16::from(noise[y * 40 + x] % 21) - 10) as u8;
            pix.fill(v);
        })
        .unwrap()
    }

    #[test]
    fn flat_input_is_identity() {
        let image = PixelBuffer::fill(123, ColorSpace::RGB, 17, 11).unwrap();
        assert_eq!(edge_preserving_filter(&image, 60.0, 0.4).unwrap(), image);
        assert_eq!(stylize(&image, 60.0, 0.45).unwrap(), image);
    }

    #[test]
    fn smooths_noise_but_keeps_the_edge() {
        let image = noisy_halves(3);
        let out = edge_preserving_filter(&image, 60.0, 0.4).unwrap();

        let spread = |img: &PixelBuffer, x0: usize| {
            let values: Vec<u8> = (0..30)
                .flat_map(|y| (x0..x0 + 15).map(move |x| (x, y)))
                .map(|(x, y)| img.pixel(x, y)[0])
                .collect();
            values.iter().max().unwrap() - values.iter().min().unwrap()
        };
        assert!(spread(&out, 0) < spread(&image, 0));
        assert!(spread(&out, 25) < spread(&image, 25));

        // the step between the halves survives
        assert!(out.pixel(5, 15)[0] < 80);
        assert!(out.pixel(35, 15)[0] > 170);
    }

    #[test]
    fn stylize_darkens_edges() {
        let image = PixelBuffer::from_fn(30, 10, ColorSpace::RGB, |x, _, pix| {
            pix.fill(if x < 15 { 200 } else { 250 });
        })
        .unwrap();
        let out = stylize(&image, 60.0, 0.45).unwrap();

        assert!(out.pixel(15, 5)[0] < out.pixel(2, 5)[0]);
        assert!(out.pixel(29, 5)[0] > 200);
    }

    #[test]
    fn detail_enhance_keeps_flat_and_alpha() {
        let image = PixelBuffer::from_u8(&[90, 90, 90, 31].repeat(64), 8, 8, ColorSpace::RGBA).unwrap();
        let out = detail_enhance(&image, 10.0, 0.15, 3.0).unwrap();

        assert_eq!(out.colorspace(), ColorSpace::RGBA);
        for pix in out.pixels().chunks_exact(4) {
            assert_eq!(pix[3], 31);
            assert!(pix[0].abs_diff(90) <= 8);
        }
    }

    #[test]
    fn detail_enhance_increases_local_contrast() {
        let image = noisy_halves(9);
        let out = detail_enhance(&image, 10.0, 0.15, 3.0).unwrap();

        let dev = |img: &PixelBuffer| {
            (0..30)
                .map(|y| i32::from(img.pixel(5, y)[0]) - i32::from(img.pixel(6, y)[0]))
                .map(i32::abs)
                .sum::<i32>()
        };
        assert!(dev(&out) > dev(&image));
    }

    #[test]
    fn pencil_shade_of_flat_image_is_flat() {
        let image = PixelBuffer::fill(128, ColorSpace::RGB, 15, 12).unwrap();
        let out = pencil_shade(&image, 50.0, 0.07, 0.1).unwrap();

        assert_eq!(out.colorspace(), ColorSpace::Luma);
        assert!(out.pixels().iter().all(|v| *v == out.pixels()[0]));
        assert!(out.pixels()[0] > 200);
    }

    #[test]
    fn pencil_shade_draws_a_line_on_steps() {
        let image = PixelBuffer::from_fn(40, 10, ColorSpace::RGB, |x, _, pix| {
            pix.fill(if x < 20 { 30 } else { 220 });
        })
        .unwrap();
        let out = pencil_shade(&image, 50.0, 0.07, 0.1).unwrap();

        let darkest = (17..23).map(|x| out.pixel(x, 5)[0]).min().unwrap();
        assert!(darkest < 30);
        assert!(out.pixel(2, 5)[0] > 200);
        assert!(out.pixel(37, 5)[0] > 200);

        assert!(matches!(
            pencil_shade(&image, 50.0, 0.07, 1.5),
            Err(ImageErrors::InvalidParameter(_))
        ));
    }

    #[test]
    fn rejects_bad_sigmas() {
        let image = PixelBuffer::fill(0, ColorSpace::RGB, 4, 4).unwrap();
        assert!(matches!(
            edge_preserving_filter(&image, 0.0, 0.4),
            Err(ImageErrors::InvalidParameter(_))
        ));
        assert!(matches!(
            stylize(&image, 60.0, -1.0),
            Err(ImageErrors::InvalidParameter(_))
        ));
        let gray = PixelBuffer::fill(0, ColorSpace::Luma, 4, 4).unwrap();
        assert!(matches!(
            detail_enhance(&gray, 10.0, 0.15, 3.0),
            Err(ImageErrors::InvalidChannelCount(3, 1))
        ));
    }
}
