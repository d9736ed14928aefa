/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Sobel derivative filter
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::pad::PadMethod;
use crate::spatial::spatial;
use crate::utils::{map_planes, round_u8};

/// Horizontal and vertical derivative of a 3x3 window
///
/// Gx matrix
/// ```text
///   -1, 0, 1,
///   -2, 0, 2,
///   -1, 0, 1
/// ```
/// Gy matrix
/// ```text
/// -1,-2,-1,
///  0, 0, 0,
///  1, 2, 1
/// ```
#[rustfmt::skip]
#[inline]
fn sobel_window<T>(c: &[T]) -> (T, T)
where
    T: Copy + std::ops::Add<Output = T> + std::ops::Sub<Output = T>
{
    let gx = (c[2] + c[5] + c[5] + c[8]) - (c[0] + c[3] + c[3] + c[6]);
    let gy = (c[6] + c[7] + c[7] + c[8]) - (c[0] + c[1] + c[1] + c[2]);
    (gx, gy)
}

/// Compute `(dx, dy)` of a float plane, replicating edges
#[must_use]
pub fn sobel_f32(plane: &[f32], width: usize, height: usize) -> (Vec<f32>, Vec<f32>) {
    spatial(plane, width, height, 1, PadMethod::Replicate, sobel_window)
        .into_iter()
        .unzip()
}

/// Compute `(dx, dy)` of an 8-bit plane exactly, replicating edges
#[must_use]
pub fn sobel_i32(plane: &[u8], width: usize, height: usize) -> (Vec<i32>, Vec<i32>) {
    let widened: Vec<i32> = plane.iter().map(|x| i32::from(*x)).collect();

    spatial(&widened, width, height, 1, PadMethod::Replicate, sobel_window)
        .into_iter()
        .unzip()
}

/// Perform a sobel image derivative, storing the gradient magnitude
///
/// This operation calculates the gradient of the image,
/// which represents how quickly pixel values change from
/// one point to another in both the horizontal and vertical directions.
///
/// The output is `sqrt(dx^2 + dy^2)` clamped to 255, alpha is copied through
#[derive(Default, Copy, Clone)]
pub struct Sobel;

impl Sobel {
    #[must_use]
    pub fn new() -> Sobel {
        Self
    }
}

impl OperationsTrait for Sobel {
    fn name(&self) -> &'static str {
        "Sobel"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        let (width, height) = image.dimensions();

        map_planes(image, false, |plane| {
            let (dx, dy) = sobel_i32(plane, width, height);

            dx.iter()
                .zip(&dy)
                .map(|(x, y)| round_u8(((x * x + y * y) as f32).sqrt()))
                .collect()
        })
    }
}
