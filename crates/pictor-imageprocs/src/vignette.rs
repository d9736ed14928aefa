/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Darken the corners of an image
//!
//! The mask is the outer product of two gaussian profiles, one across the
//! width and one across the height, each scaled so its peak is 1. The centre
//! is therefore left untouched and brightness falls off towards the edges.
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::utils::round_u8;

/// Gaussian profile of `len` samples centred at `(len-1)/2` with peak 1
///
/// Distances are taken relative to the sample nearest the centre, so the
/// peak stays exactly 1 even when every other sample underflows.
fn profile(len: usize, sigma: f32) -> Vec<f32> {
    let centre = (len as f32 - 1.0) * 0.5;
    let nearest = centre.fract();
    let scale = -0.5 / (sigma * sigma);

    (0..len)
        .map(|i| {
            let x = i as f32 - centre;
            (scale * (x * x - nearest * nearest)).exp()
        })
        .collect()
}

/// Apply a vignette, alpha is left untouched
#[derive(Copy, Clone, Debug)]
pub struct Vignette {
    sigma: f32
}

impl Vignette {
    /// Create a vignette, smaller sigmas darken more aggressively
    #[must_use]
    pub fn new(sigma: f32) -> Vignette {
        Vignette { sigma }
    }
}

impl OperationsTrait for Vignette {
    fn name(&self) -> &'static str {
        "Vignette"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        if !(self.sigma > 0.0 && self.sigma.is_finite()) {
            return Err(ImageErrors::InvalidParameter(format!(
                "Vignette sigma must be positive, found {}",
                self.sigma
            )));
        }
        let (width, height) = image.dimensions();
        let channels = image.channels();
        let colors = image.colorspace().color_components();

        let gx = profile(width, self.sigma);
        let gy = profile(height, self.sigma);

        let mut pixels = image.pixels().to_vec();

        for (row, fy) in pixels.chunks_exact_mut(width * channels).zip(&gy) {
            for (pix, fx) in row.chunks_exact_mut(channels).zip(&gx) {
                let factor = fx * fy;
                for v in &mut pix[..colors] {
                    *v = round_u8(f32::from(*v) * factor);
                }
            }
        }
        PixelBuffer::from_vec(pixels, width, height, image.colorspace())
    }
}

/// Multiply every color channel by a centred gaussian mask
///
/// # Errors
/// `InvalidParameter` if sigma is not positive
pub fn apply_vignette(image: &PixelBuffer, sigma: f32) -> Result<PixelBuffer, ImageErrors> {
    Vignette::new(sigma).execute(image)
}
