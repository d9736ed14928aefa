/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Weighted sum of two images
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::utils::round_u8;

/// Create a blend filter computing `weight_a * image + weight_b * other + bias`
///
/// Every channel, alpha included, is blended. Results are rounded and
/// clamped to `[0,255]`. Negative weights are allowed, which is how an
/// unsharp mask subtracts a blurred copy.
pub struct LinearBlend<'src> {
    other:    &'src PixelBuffer,
    weight_a: f32,
    weight_b: f32,
    bias:     f32
}

impl<'src> LinearBlend<'src> {
    #[must_use]
    pub fn new(other: &'src PixelBuffer, weight_a: f32, weight_b: f32, bias: f32) -> LinearBlend<'src> {
        LinearBlend {
            other,
            weight_a,
            weight_b,
            bias
        }
    }
}

impl<'src> OperationsTrait for LinearBlend<'src> {
    fn name(&self) -> &'static str {
        "Linear blend"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        // confirm invariants
        image.check_same_dimensions(self.other)?;

        if image.channels() != self.other.channels() {
            return Err(ImageErrors::InvalidChannelCount(
                image.channels(),
                self.other.channels()
            ));
        }
        let (width, height) = image.dimensions();

        let pixels = image
            .pixels()
            .iter()
            .zip(self.other.pixels())
            .map(|(a, b)| {
                round_u8(self.weight_a * f32::from(*a) + self.weight_b * f32::from(*b) + self.bias)
            })
            .collect();

        PixelBuffer::from_vec(pixels, width, height, image.colorspace())
    }
}

/// Blend two images, `weight_a * a + weight_b * b + bias`
///
/// The output takes the colorspace of `a`
///
/// # Errors
/// - `DimensionMismatch` if the images differ in size
/// - `InvalidChannelCount` if they differ in channel count
pub fn linear_blend(
    a: &PixelBuffer, b: &PixelBuffer, weight_a: f32, weight_b: f32, bias: f32
) -> Result<PixelBuffer, ImageErrors> {
    LinearBlend::new(b, weight_a, weight_b, bias).execute(a)
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::errors::ImageErrors;
    use pictor_image::image::PixelBuffer;

    use crate::blend::linear_blend;

    #[test]
    fn identity_weights() {
        let mut pixels = vec![0; 10 * 10 * 3];
        nanorand::WyRand::new_seed(12).fill(&mut pixels);
        let a = PixelBuffer::from_vec(pixels, 10, 10, ColorSpace::RGB).unwrap();
        let b = PixelBuffer::fill(33, ColorSpace::RGB, 10, 10).unwrap();

        assert_eq!(linear_blend(&a, &b, 1.0, 0.0, 0.0).unwrap(), a);
    }

    #[test]
    fn saturates_both_ways() {
        let a = PixelBuffer::fill(200, ColorSpace::Luma, 2, 2).unwrap();
        let b = PixelBuffer::fill(100, ColorSpace::Luma, 2, 2).unwrap();

        let high = linear_blend(&a, &b, 1.0, 1.0, 0.0).unwrap();
        assert!(high.pixels().iter().all(|x| *x == 255));

        let low = linear_blend(&a, &b, -1.0, 0.5, 0.0).unwrap();
        assert!(low.pixels().iter().all(|x| *x == 0));

        // 1.5 * 100 - 0.5 * 200
        let sharp = linear_blend(&b, &a, 1.5, -0.5, 0.0).unwrap();
        assert!(sharp.pixels().iter().all(|x| *x == 50));
    }

    #[test]
    fn mismatches() {
        let a = PixelBuffer::fill(0, ColorSpace::RGB, 4, 4).unwrap();
        let b = PixelBuffer::fill(0, ColorSpace::RGB, 4, 5).unwrap();
        let c = PixelBuffer::fill(0, ColorSpace::Luma, 4, 4).unwrap();

        assert!(matches!(
            linear_blend(&a, &b, 0.5, 0.5, 0.0),
            Err(ImageErrors::DimensionMismatch((4, 4), (4, 5)))
        ));
        assert!(matches!(
            linear_blend(&a, &c, 0.5, 0.5, 0.0),
            Err(ImageErrors::InvalidChannelCount(3, 1))
        ));
    }
}
