/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Per pixel scaled division of two images
//!
//! Computes `round(a * scale / b)` saturated to `[0,255]`, a zero divisor
//! gives 0. Dividing a gray image by a blurred negative of itself is the
//! classic colour dodge behind the pencil sketch look.
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::utils::round_u8;

pub struct Divide<'src> {
    divisor: &'src PixelBuffer,
    scale:   f32
}

impl<'src> Divide<'src> {
    #[must_use]
    pub fn new(divisor: &'src PixelBuffer, scale: f32) -> Divide<'src> {
        Divide { divisor, scale }
    }
}

impl<'src> OperationsTrait for Divide<'src> {
    fn name(&self) -> &'static str {
        "Divide"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        image.check_same_dimensions(self.divisor)?;

        if image.channels() != self.divisor.channels() {
            return Err(ImageErrors::InvalidChannelCount(
                image.channels(),
                self.divisor.channels()
            ));
        }
        let (width, height) = image.dimensions();

        let pixels = image
            .pixels()
            .iter()
            .zip(self.divisor.pixels())
            .map(|(a, b)| {
                if *b == 0 {
                    0
                } else {
                    round_u8(f32::from(*a) * self.scale / f32::from(*b))
                }
            })
            .collect();

        PixelBuffer::from_vec(pixels, width, height, image.colorspace())
    }
}

/// Divide `a` by `b` per pixel and multiply by `scale`
///
/// # Errors
/// - `DimensionMismatch` if the images differ in size
/// - `InvalidChannelCount` if they differ in channel count
pub fn divide(a: &PixelBuffer, b: &PixelBuffer, scale: f32) -> Result<PixelBuffer, ImageErrors> {
    Divide::new(b, scale).execute(a)
}

#[cfg(test)]
mod tests {
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::errors::ImageErrors;
    use pictor_image::image::PixelBuffer;

    use crate::divide::divide;

    #[test]
    fn scaled_division() {
        let a = PixelBuffer::from_u8(&[100, 200, 50, 7], 4, 1, ColorSpace::Luma).unwrap();
        let b = PixelBuffer::from_u8(&[200, 100, 0, 255], 4, 1, ColorSpace::Luma).unwrap();

        let out = divide(&a, &b, 256.0).unwrap();
        // 128, 512 saturates, zero divisor, 7.03
        assert_eq!(out.pixels(), &[128, 255, 0, 7]);
    }

    #[test]
    fn mismatch() {
        let a = PixelBuffer::fill(1, ColorSpace::Luma, 3, 3).unwrap();
        let b = PixelBuffer::fill(1, ColorSpace::Luma, 3, 2).unwrap();
        assert!(matches!(
            divide(&a, &b, 1.0),
            Err(ImageErrors::DimensionMismatch(_, _))
        ));
    }
}
