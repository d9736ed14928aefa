/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Adaptive thresholding
//!
//! Unlike a global threshold the cut-off is computed per pixel from the mean
//! of its `block_size x block_size` neighbourhood, which copes with uneven
//! lighting. A pixel becomes 255 when it is brighter than `mean - c`, 0
//! otherwise.
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::pad::{pad, PadMethod};
use crate::utils::{check_odd, map_planes};

/// Mean of every `block x block` window, rounded to 8 bits
///
/// Uses a summed area table over a replicate padded plane
fn box_mean(plane: &[u8], width: usize, height: usize, block: usize) -> Vec<u8> {
    let radius = block / 2;
    let padded = pad(plane, width, height, radius, radius, PadMethod::Replicate);

    let pw = width + 2 * radius;
    let ph = height + 2 * radius;

    // integral image with a leading row and column of zeros
    let stride = pw + 1;
    let mut integral = vec![0_u64; stride * (ph + 1)];

    for y in 0..ph {
        let mut row_sum = 0_u64;
        for x in 0..pw {
            row_sum += u64::from(padded[y * pw + x]);
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }
    let area = (block * block) as u64;

    let mut out = vec![0; width * height];

    for (y, out_row) in out.chunks_exact_mut(width).enumerate() {
        for (x, out_px) in out_row.iter_mut().enumerate() {
            let (x0, y0, x1, y1) = (x, y, x + block, y + block);
            let sum = integral[y1 * stride + x1] + integral[y0 * stride + x0]
                - integral[y0 * stride + x1]
                - integral[y1 * stride + x0];
            // round half up
            *out_px = ((sum + area / 2) / area) as u8;
        }
    }
    out
}

/// Threshold a single plane against its local mean
#[must_use]
pub fn adaptive_threshold_plane(
    plane: &[u8], width: usize, height: usize, block_size: usize, c: f32
) -> Vec<u8> {
    let mean = box_mean(plane, width, height, block_size);
    let delta = c.ceil() as i32;

    plane
        .iter()
        .zip(&mean)
        .map(|(src, mean)| {
            if i32::from(*src) - i32::from(*mean) > -delta {
                255
            } else {
                0
            }
        })
        .collect()
}

/// Adaptive mean threshold on a single channel image
#[derive(Copy, Clone, Debug)]
pub struct AdaptiveThreshold {
    block_size: usize,
    c:          f32
}

impl AdaptiveThreshold {
    /// Create an adaptive threshold
    ///
    /// # Arguments
    /// - block_size: Size of the neighbourhood, odd and at least 3
    /// - c: Constant subtracted from the mean
    #[must_use]
    pub fn new(block_size: usize, c: f32) -> AdaptiveThreshold {
        AdaptiveThreshold { block_size, c }
    }
}

impl OperationsTrait for AdaptiveThreshold {
    fn name(&self) -> &'static str {
        "Adaptive threshold"
    }

    fn supported_channels(&self) -> &'static [usize] {
        &[1]
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        check_odd("Adaptive threshold block size", self.block_size, 3)?;

        if !self.c.is_finite() {
            return Err(ImageErrors::InvalidParameter(format!(
                "Threshold constant must be finite, found {}",
                self.c
            )));
        }
        let (width, height) = image.dimensions();

        map_planes(image, true, |plane| {
            adaptive_threshold_plane(plane, width, height, self.block_size, self.c)
        })
    }
}

/// Binarize a single channel image against its local mean
///
/// # Errors
/// - `InvalidChannelCount` if the image is not single channel
/// - `InvalidParameter` if `block_size` is even or less than 3
pub fn adaptive_threshold(
    gray: &PixelBuffer, block_size: usize, c: f32
) -> Result<PixelBuffer, ImageErrors> {
    AdaptiveThreshold::new(block_size, c).execute(gray)
}
