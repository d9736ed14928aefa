/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Perform a color matrix operation
//!
//! Every pixel's color channels are multiplied by a 3x3 matrix
//!
//! The matrix is equivalent to the operation
//! ```text
//! red   = m[0][0]*r + m[0][1]*g + m[0][2]*b
//! green = m[1][0]*r + m[1][1]*g + m[1][2]*b
//! blue  = m[2][0]*r + m[2][1]*g + m[2][2]*b
//!```
//! Results are rounded and clamped to `[0,255]`, an alpha channel is left
//! as is.
//!
//! ## Examples of color matrix
//!
//! - An identity color matrix that does nothing
//! ```text
//! [[1.0, 0.0, 0.0],
//!  [0.0, 1.0, 0.0],
//!  [0.0, 0.0, 1.0]]
//! ```
//! - The classic sepia tone, see [`ColorMatrix::sepia`]
//! ```text
//! [[0.393, 0.769, 0.189],
//!  [0.349, 0.686, 0.168],
//!  [0.272, 0.534, 0.131]]
//! ```
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::utils::round_u8;

/// A color matrix filter
///
/// # Example
/// ```rust
/// use pictor_image::colorspace::ColorSpace;
/// use pictor_image::errors::ImageErrors;
/// use pictor_image::image::PixelBuffer;
/// use pictor_image::traits::OperationsTrait;
/// use pictor_imageprocs::color_matrix::ColorMatrix;
///
/// let image = PixelBuffer::fill(100, ColorSpace::RGB, 10, 10)?;
/// // swap red and blue
/// let filter = ColorMatrix::new([[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]]);
/// let swapped = filter.execute(&image)?;
/// assert_eq!(swapped, image);
/// # Ok::<(), ImageErrors>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ColorMatrix {
    matrix: [[f32; 3]; 3]
}

impl ColorMatrix {
    #[must_use]
    pub fn new(matrix: [[f32; 3]; 3]) -> ColorMatrix {
        ColorMatrix { matrix }
    }
    /// Try to create a new color matrix from a row major slice
    /// of data, the length of the slice must be 9 otherwise
    /// this function will return None
    #[must_use]
    pub fn try_from_slice(slice: &[f32]) -> Option<ColorMatrix> {
        if slice.len() != 9 {
            return None;
        }
        let mut matrix = [[0f32; 3]; 3];
        for (row, values) in matrix.iter_mut().zip(slice.chunks_exact(3)) {
            row.copy_from_slice(values);
        }
        Some(ColorMatrix::new(matrix))
    }

    /// The warm brown sepia tone matrix
    #[must_use]
    pub const fn sepia() -> ColorMatrix {
        ColorMatrix {
            matrix: [
                [0.393, 0.769, 0.189],
                [0.349, 0.686, 0.168],
                [0.272, 0.534, 0.131]
            ]
        }
    }
}

impl OperationsTrait for ColorMatrix {
    fn name(&self) -> &'static str {
        "Color Matrix"
    }

    fn supported_channels(&self) -> &'static [usize] {
        &[3, 4]
    }

    #[allow(clippy::many_single_char_names)]
    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        let (width, height) = image.dimensions();
        let channels = image.channels();
        let m = &self.matrix;

        let mut pixels = image.pixels().to_vec();

        for pix in pixels.chunks_exact_mut(channels) {
            let r = f32::from(pix[0]);
            let g = f32::from(pix[1]);
            let b = f32::from(pix[2]);

            for (out, row) in pix.iter_mut().zip(m) {
                *out = round_u8(row[0] * r + row[1] * g + row[2] * b);
            }
        }
        PixelBuffer::from_vec(pixels, width, height, image.colorspace())
    }
}

/// Multiply every pixel by `matrix`
///
/// # Errors
/// `InvalidChannelCount` if the image does not have 3 or 4 channels
pub fn color_matrix(image: &PixelBuffer, matrix: &ColorMatrix) -> Result<PixelBuffer, ImageErrors> {
    matrix.execute(image)
}
