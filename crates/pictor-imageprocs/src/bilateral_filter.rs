/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Bilateral filter
//!
//! An edge preserving smoothing filter, each output pixel is a weighted mean
//! of the pixels in a disc around it where the weight is the product of
//!
//! - a spatial gaussian of the distance to the centre, and
//! - a color gaussian of the sum of absolute channel differences to the centre.
//!
//! Pixels across a strong edge differ a lot in color and barely contribute,
//! so flat areas are smoothed while edges stay sharp.
use log::trace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::utils::{clamp_index, for_each_row_band, round_u8};

/// Bilateral filter
///
/// Color channels are filtered together, alpha is copied through
///
/// # Example
/// ```
/// use pictor_image::colorspace::ColorSpace;
/// use pictor_image::errors::ImageErrors;
/// use pictor_image::image::PixelBuffer;
/// use pictor_image::traits::OperationsTrait;
/// use pictor_imageprocs::bilateral_filter::BilateralFilter;
///
/// let image = PixelBuffer::fill(90, ColorSpace::RGB, 64, 64)?;
/// let smooth = BilateralFilter::new(9, 75.0, 75.0).execute(&image)?;
/// # Ok::<(), ImageErrors>(())
/// ```
#[derive(Copy, Clone, Debug)]
pub struct BilateralFilter {
    diameter:    i32,
    sigma_color: f32,
    sigma_space: f32
}

impl BilateralFilter {
    /// Create a new bilateral filter
    ///
    /// # Arguments
    /// - diameter: Diameter of the pixel neighbourhood, if less than or
    ///   equal to zero it is derived from `sigma_space`
    /// - sigma_color: Larger values mix colors further apart
    /// - sigma_space: Larger values mix pixels further apart
    ///
    /// Non positive sigmas are treated as 1
    #[must_use]
    pub fn new(diameter: i32, sigma_color: f32, sigma_space: f32) -> BilateralFilter {
        BilateralFilter {
            diameter,
            sigma_color,
            sigma_space
        }
    }
}

struct Weights {
    color:   Vec<f32>,
    space:   Vec<f32>,
    offsets: Vec<(isize, isize)>
}

fn init_weights(diameter: i32, sigma_color: f32, sigma_space: f32, components: usize) -> Weights {
    let sigma_color = if sigma_color <= 0.0 { 1.0 } else { sigma_color };
    let sigma_space = if sigma_space <= 0.0 { 1.0 } else { sigma_space };

    let radius = if diameter <= 0 {
        (sigma_space * 1.5).round() as isize
    } else {
        (diameter / 2) as isize
    }
    .max(1);

    let gauss_color_coeff = -0.5 / (sigma_color * sigma_color);
    let gauss_space_coeff = -0.5 / (sigma_space * sigma_space);

    let color = (0..256 * components)
        .map(|i| {
            let c = i as f32;
            (c * c * gauss_color_coeff).exp()
        })
        .collect();

    let mut space = vec![];
    let mut offsets = vec![];

    for i in -radius..=radius {
        for j in -radius..=radius {
            let r = ((i * i + j * j) as f32).sqrt();
            if r > radius as f32 {
                continue;
            }
            space.push((r * r * gauss_space_coeff).exp());
            offsets.push((i, j));
        }
    }
    Weights {
        color,
        space,
        offsets
    }
}

impl OperationsTrait for BilateralFilter {
    fn name(&self) -> &'static str {
        "Bilateral filter"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        let (width, height) = image.dimensions();
        let channels = image.channels();
        let cn = image.colorspace().color_components();

        let weights = init_weights(self.diameter, self.sigma_color, self.sigma_space, cn);

        trace!(
            "Bilateral filter over {} neighbours and {cn} color channels",
            weights.offsets.len()
        );
        let src = image.pixels();
        let row_len = width * channels;

        let mut out = vec![0_u8; src.len()];

        for_each_row_band(&mut out, row_len, |first_row, band| {
            let mut sums = vec![0.0_f32; cn];

            for (band_y, out_row) in band.chunks_exact_mut(row_len).enumerate() {
                let y = first_row + band_y;

                for (x, out_px) in out_row.chunks_exact_mut(channels).enumerate() {
                    let centre = &src[(y * width + x) * channels..][..channels];

                    sums.fill(0.0);
                    let mut wsum = 0.0;

                    for (space_w, (dy, dx)) in weights.space.iter().zip(&weights.offsets) {
                        let sy = clamp_index(y as isize + dy, height);
                        let sx = clamp_index(x as isize + dx, width);
                        let neighbour = &src[(sy * width + sx) * channels..][..channels];

                        let diff: usize = neighbour[..cn]
                            .iter()
                            .zip(&centre[..cn])
                            .map(|(a, b)| usize::from(a.abs_diff(*b)))
                            .sum();

                        let w = space_w * weights.color[diff];

                        for (sum, v) in sums.iter_mut().zip(&neighbour[..cn]) {
                            *sum += f32::from(*v) * w;
                        }
                        wsum += w;
                    }
                    for (o, sum) in out_px[..cn].iter_mut().zip(&sums) {
                        *o = round_u8(sum / wsum);
                    }
                    // alpha
                    out_px[cn..].copy_from_slice(&centre[cn..]);
                }
            }
        });

        PixelBuffer::from_vec(out, width, height, image.colorspace())
    }
}

/// Bilateral filter an image
///
/// # Errors
/// Never fails for valid images, the result type matches other primitives
pub fn bilateral_filter(
    image: &PixelBuffer, diameter: i32, sigma_color: f32, sigma_space: f32
) -> Result<PixelBuffer, ImageErrors> {
    BilateralFilter::new(diameter, sigma_color, sigma_space).execute(image)
}
