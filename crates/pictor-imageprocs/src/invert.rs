/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Invert an image's pixels
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

/// Invert the color channels of an image, alpha is kept
///
/// The formula for inverting a 8 bit pixel
///  is `pixel[x,y] = 255-pixel[x,y]`
#[derive(Default, Copy, Clone, Debug)]
pub struct Invert;

impl Invert {
    #[must_use]
    pub fn new() -> Invert {
        Invert
    }
}

impl OperationsTrait for Invert {
    fn name(&self) -> &'static str {
        "Invert"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        let (width, height) = image.dimensions();
        let channels = image.channels();
        let colors = image.colorspace().color_components();

        let mut pixels = image.pixels().to_vec();

        for pix in pixels.chunks_exact_mut(channels) {
            pix[..colors].iter_mut().for_each(|x| *x = u8::MAX - *x);
        }
        PixelBuffer::from_vec(pixels, width, height, image.colorspace())
    }
}

/// Return `255 - pixel` for every color channel
///
/// # Errors
/// Only fails on inconsistent image state
pub fn invert(image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
    Invert::new().execute(image)
}

#[cfg(test)]
mod tests {
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::image::PixelBuffer;

    use crate::invert::invert;

    #[test]
    fn invert_twice_is_identity() {
        let image = PixelBuffer::from_fn(16, 9, ColorSpace::RGB, |x, y, pix| {
            pix.copy_from_slice(&[x as u8, y as u8, (x * y) as u8]);
        })
        .unwrap();
        let once = invert(&image).unwrap();
        assert_eq!(once.pixel(3, 2), &[252, 253, 249]);
        assert_eq!(invert(&once).unwrap(), image);
    }

    #[test]
    fn alpha_untouched() {
        let image = PixelBuffer::from_u8(&[0, 255, 10, 200], 1, 1, ColorSpace::RGBA).unwrap();
        assert_eq!(invert(&image).unwrap().pixels(), &[255, 0, 245, 200]);
    }
}
