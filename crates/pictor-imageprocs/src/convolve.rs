/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! 2D convolution on images
//!
//! Any odd sized square kernel is accepted. Borders replicate the edge
//! pixels and the intermediate calculations are carried in `f32`.
use log::trace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::pad::PadMethod;
use crate::spatial::spatial;
use crate::utils::{map_planes, round_u8};

/// An odd sized square matrix of weights
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size:    usize,
    weights: Vec<f32>
}

impl Kernel {
    /// Create a kernel of `size x size` weights in row major order
    ///
    /// # Errors
    /// `InvalidParameter` if `size` is even or zero, or `weights` does
    /// not hold `size*size` values
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Kernel, ImageErrors> {
        if size % 2 == 0 {
            return Err(ImageErrors::InvalidParameter(format!(
                "Kernel size must be odd, found {size}"
            )));
        }
        if weights.len() != size * size {
            return Err(ImageErrors::InvalidParameter(format!(
                "A {size}x{size} kernel needs {} weights, found {}",
                size * size,
                weights.len()
            )));
        }
        Ok(Kernel { size, weights })
    }

    /// The 3x3 Laplacian style sharpen kernel
    ///
    /// ```text
    ///  0,-1, 0
    /// -1, 5,-1
    ///  0,-1, 0
    /// ```
    #[rustfmt::skip]
    #[must_use]
    pub fn sharpen() -> Kernel {
        Kernel {
            size:    3,
            weights: vec![
                 0.0, -1.0,  0.0,
                -1.0,  5.0, -1.0,
                 0.0, -1.0,  0.0
            ]
        }
    }

    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    const fn radius(&self) -> usize {
        self.size / 2
    }
}

/// Convolve a float plane with a kernel, replicating edges
///
/// No rounding or clamping is done, which keeps the operation linear
#[must_use]
pub fn convolve_f32(plane: &[f32], width: usize, height: usize, kernel: &Kernel) -> Vec<f32> {
    spatial(
        plane,
        width,
        height,
        kernel.radius(),
        PadMethod::Replicate,
        |window| {
            window
                .iter()
                .zip(&kernel.weights)
                .map(|(a, b)| a * b)
                .sum::<f32>()
        }
    )
}

/// Convolve an 8-bit plane, rounding and clamping the result
#[must_use]
pub fn convolve_u8(plane: &[u8], width: usize, height: usize, kernel: &Kernel) -> Vec<u8> {
    spatial(
        plane,
        width,
        height,
        kernel.radius(),
        PadMethod::Replicate,
        |window| {
            let sum = window
                .iter()
                .zip(&kernel.weights)
                .map(|(a, b)| f32::from(*a) * b)
                .sum::<f32>();
            round_u8(sum)
        }
    )
}

/// Convolve an image
///
/// # Alpha channel
/// - Alpha channel is copied through
///
/// # Example
/// - Sharpen an image
///
/// ```
/// use pictor_image::colorspace::ColorSpace;
/// use pictor_image::errors::ImageErrors;
/// use pictor_image::image::PixelBuffer;
/// use pictor_image::traits::OperationsTrait;
/// use pictor_imageprocs::convolve::{Convolve, Kernel};
///
/// let image = PixelBuffer::from_fn(100, 100, ColorSpace::Luma, |x, y, pix| {
///     pix[0] = ((x + y) % 256) as u8;
/// })?;
/// let sharpened = Convolve::new(Kernel::sharpen()).execute(&image)?;
/// # Ok::<(), ImageErrors>(())
/// ```
pub struct Convolve {
    kernel: Kernel
}

impl Convolve {
    #[must_use]
    pub fn new(kernel: Kernel) -> Convolve {
        Convolve { kernel }
    }
}

impl OperationsTrait for Convolve {
    fn name(&self) -> &'static str {
        "2D convolution"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        let (width, height) = image.dimensions();
        trace!("Convolving with a {0}x{0} kernel", self.kernel.size);

        map_planes(image, false, |plane| {
            convolve_u8(plane, width, height, &self.kernel)
        })
    }
}

/// Convolve every color channel of `image` with `kernel`
///
/// # Errors
/// See [`Convolve`]
pub fn convolve(image: &PixelBuffer, kernel: &Kernel) -> Result<PixelBuffer, ImageErrors> {
    Convolve::new(kernel.clone()).execute(image)
}
