/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Canny edge detection
//!
//! The detector runs in four steps
//!
//! 1. 3x3 Sobel derivatives with replicated borders
//! 2. L1 gradient magnitude `|dx| + |dy|`
//! 3. Non maximum suppression along the gradient direction, quantized to
//!    horizontal, vertical or one of the two diagonals
//! 4. Hysteresis, pixels above `high` are edges and pixels above `low`
//!    become edges when connected to one (8-connectivity)
//!
//! The output is a single channel mask of `0` and `255`.
use log::trace;
use pictor_image::colorspace::ColorSpace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::sobel::sobel_i32;

// tan(22.5 degrees)
const TG22: f32 = 0.414_213_57;

#[derive(Copy, Clone, PartialEq, Eq)]
enum Mark {
    None,
    Weak,
    Strong
}

/// Canny edge detector on a single channel image
///
/// # Example
/// ```
/// use pictor_image::colorspace::ColorSpace;
/// use pictor_image::errors::ImageErrors;
/// use pictor_image::image::PixelBuffer;
/// use pictor_image::traits::OperationsTrait;
/// use pictor_imageprocs::canny::Canny;
///
/// let gray = PixelBuffer::from_fn(32, 32, ColorSpace::Luma, |x, _, pix| {
///     pix[0] = if x < 16 { 0 } else { 255 };
/// })?;
/// let edges = Canny::new(100.0, 200.0).execute(&gray)?;
/// assert!(edges.pixels().contains(&255));
/// # Ok::<(), ImageErrors>(())
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Canny {
    low:  f32,
    high: f32
}

impl Canny {
    #[must_use]
    pub fn new(low: f32, high: f32) -> Canny {
        Canny { low, high }
    }
}

impl OperationsTrait for Canny {
    fn name(&self) -> &'static str {
        "Canny"
    }

    fn supported_channels(&self) -> &'static [usize] {
        &[1]
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        if self.low < 0.0 || self.high < 0.0 || !self.low.is_finite() || !self.high.is_finite()
        {
            return Err(ImageErrors::InvalidParameter(format!(
                "Canny thresholds must be non negative, found {} and {}",
                self.low, self.high
            )));
        }
        if self.low > self.high {
            return Err(ImageErrors::InvalidParameter(format!(
                "Canny low threshold {} is above the high threshold {}",
                self.low, self.high
            )));
        }
        let (width, height) = image.dimensions();
        let edges = canny_plane(image.pixels(), width, height, self.low, self.high);

        PixelBuffer::from_vec(edges, width, height, ColorSpace::Luma)
    }
}

/// Run the detector on a plane
///
/// Thresholds are assumed to be validated
#[must_use]
pub fn canny_plane(plane: &[u8], width: usize, height: usize, low: f32, high: f32) -> Vec<u8> {
    let (dx, dy) = sobel_i32(plane, width, height);

    let magnitude: Vec<i32> = dx.iter().zip(&dy).map(|(x, y)| x.abs() + y.abs()).collect();

    // magnitude outside the image reads as zero
    let mag_at = |x: isize, y: isize| -> i32 {
        if x < 0 || y < 0 || x >= width as isize || y >= height as isize {
            0
        } else {
            magnitude[y as usize * width + x as usize]
        }
    };

    let mut marks = vec![Mark::None; width * height];
    let mut stack = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let i = y * width + x;
            let m = magnitude[i];

            if m as f32 <= low {
                continue;
            }
            let (xs, ys) = (dx[i].abs() as f32, dy[i].abs() as f32);
            let (xi, yi) = (x as isize, y as isize);

            let tg22x = xs * TG22;

            let is_max = if ys < tg22x {
                m > mag_at(xi - 1, yi) && m >= mag_at(xi + 1, yi)
            } else {
                let tg67x = tg22x + xs + xs;
                if ys > tg67x {
                    m > mag_at(xi, yi - 1) && m >= mag_at(xi, yi + 1)
                } else {
                    let s: isize = if (dx[i] ^ dy[i]) < 0 { -1 } else { 1 };
                    m > mag_at(xi - s, yi - 1) && m > mag_at(xi + s, yi + 1)
                }
            };
            if !is_max {
                continue;
            }
            if m as f32 > high {
                marks[i] = Mark::Strong;
                stack.push((x, y));
            } else {
                marks[i] = Mark::Weak;
            }
        }
    }
    trace!("Canny found {} strong edge seeds", stack.len());

    while let Some((x, y)) = stack.pop() {
        for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                let n = ny * width + nx;
                if marks[n] == Mark::Weak {
                    marks[n] = Mark::Strong;
                    stack.push((nx, ny));
                }
            }
        }
    }
    marks
        .into_iter()
        .map(|m| if m == Mark::Strong { 255 } else { 0 })
        .collect()
}

/// Detect edges of a single channel image
///
/// # Errors
/// - `InvalidChannelCount` if the image is not single channel
/// - `InvalidParameter` if a threshold is negative or `low > high`
pub fn gradient_edges(gray: &PixelBuffer, low: f32, high: f32) -> Result<PixelBuffer, ImageErrors> {
    Canny::new(low, high).execute(gray)
}
