/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Combine two images under a mask
use pictor_image::colorspace::ColorSpace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

/// Keep pixels where a single channel mask is set
///
/// Where `mask != 0` every channel becomes `image & other`, elsewhere 0.
/// Combining an image with itself therefore copies it through the mask.
pub struct MaskedCombine<'src> {
    other: &'src PixelBuffer,
    mask:  &'src PixelBuffer
}

impl<'src> MaskedCombine<'src> {
    #[must_use]
    pub fn new(other: &'src PixelBuffer, mask: &'src PixelBuffer) -> MaskedCombine<'src> {
        MaskedCombine { other, mask }
    }
}

impl<'src> OperationsTrait for MaskedCombine<'src> {
    fn name(&self) -> &'static str {
        "Masked combine"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        image.check_same_dimensions(self.other)?;
        image.check_same_dimensions(self.mask)?;

        if image.channels() != self.other.channels() {
            return Err(ImageErrors::InvalidChannelCount(
                image.channels(),
                self.other.channels()
            ));
        }
        if self.mask.channels() != 1 {
            return Err(ImageErrors::InvalidChannelCount(1, self.mask.channels()));
        }
        let (width, height) = image.dimensions();
        let channels = image.channels();

        let mut out = vec![0_u8; image.pixels().len()];

        for (((out_px, a), b), m) in out
            .chunks_exact_mut(channels)
            .zip(image.pixels().chunks_exact(channels))
            .zip(self.other.pixels().chunks_exact(channels))
            .zip(self.mask.pixels())
        {
            if *m != 0 {
                for ((o, x), y) in out_px.iter_mut().zip(a).zip(b) {
                    *o = x & y;
                }
            }
        }
        PixelBuffer::from_vec(out, width, height, image.colorspace())
    }
}

/// Bitwise AND of `a` and `b` where `mask` is set, zero elsewhere
///
/// # Errors
/// - `DimensionMismatch` if any of the three differs in size
/// - `InvalidChannelCount` if `a` and `b` differ in channels or the mask is
///   not single channel
pub fn masked_combine(
    a: &PixelBuffer, b: &PixelBuffer, mask: &PixelBuffer
) -> Result<PixelBuffer, ImageErrors> {
    MaskedCombine::new(b, mask).execute(a)
}

/// Broadcast a single channel image to three identical RGB channels
///
/// # Errors
/// `InvalidChannelCount` if the image is not single channel
pub fn broadcast_gray(gray: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
    if gray.channels() != 1 {
        return Err(ImageErrors::InvalidChannelCount(1, gray.channels()));
    }
    gray.convert_color(ColorSpace::RGB)
}

#[cfg(test)]
mod tests {
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::errors::ImageErrors;
    use pictor_image::image::PixelBuffer;

    use crate::composite::{broadcast_gray, masked_combine};

    #[test]
    fn self_combine_copies_under_mask() {
        let image = PixelBuffer::from_u8(&[1, 2, 3, 4, 5, 6], 2, 1, ColorSpace::RGB).unwrap();
        let mask = PixelBuffer::from_u8(&[255, 0], 2, 1, ColorSpace::Luma).unwrap();

        let out = masked_combine(&image, &image, &mask).unwrap();
        assert_eq!(out.pixels(), &[1, 2, 3, 0, 0, 0]);
    }

    #[test]
    fn different_images_are_anded() {
        let a = PixelBuffer::fill(0b1100, ColorSpace::Luma, 1, 1).unwrap();
        let b = PixelBuffer::fill(0b1010, ColorSpace::Luma, 1, 1).unwrap();
        let mask = PixelBuffer::fill(1, ColorSpace::Luma, 1, 1).unwrap();

        assert_eq!(masked_combine(&a, &b, &mask).unwrap().pixels(), &[0b1000]);
    }

    #[test]
    fn mask_must_be_gray() {
        let image = PixelBuffer::fill(0, ColorSpace::RGB, 2, 2).unwrap();
        assert!(matches!(
            masked_combine(&image, &image, &image),
            Err(ImageErrors::InvalidChannelCount(1, 3))
        ));
        assert!(broadcast_gray(&image).is_err());
    }
}
