/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Adjust the saturation of an HSV image
//!
//! The image must already be in HSV, the caller converts to and from it.
//! This keeps the operation exact, only channel 1 is touched.
use pictor_image::colorspace::ColorSpace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

/// Add a constant to the saturation channel, clamping to `[0,255]`
///
/// # Example
/// ```
/// use pictor_image::colorspace::ColorSpace;
/// use pictor_image::errors::ImageErrors;
/// use pictor_image::image::PixelBuffer;
/// use pictor_image::traits::OperationsTrait;
/// use pictor_imageprocs::hsv_adjust::AdjustSaturation;
///
/// let hsv = PixelBuffer::fill(100, ColorSpace::RGB, 4, 4)?.convert_color(ColorSpace::HSV)?;
/// let vivid = AdjustSaturation::new(30).execute(&hsv)?;
/// assert_eq!(vivid.pixel(0, 0)[1], 30);
/// # Ok::<(), ImageErrors>(())
/// ```
#[derive(Copy, Clone, Debug)]
pub struct AdjustSaturation {
    delta: i16
}

impl AdjustSaturation {
    #[must_use]
    pub fn new(delta: i16) -> AdjustSaturation {
        AdjustSaturation { delta }
    }
}

impl OperationsTrait for AdjustSaturation {
    fn name(&self) -> &'static str {
        "Adjust saturation"
    }

    fn supported_channels(&self) -> &'static [usize] {
        &[3]
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        if image.colorspace() != ColorSpace::HSV {
            return Err(ImageErrors::InvalidParameter(format!(
                "Saturation can only be adjusted on HSV images, found {:?}",
                image.colorspace()
            )));
        }
        let (width, height) = image.dimensions();
        let mut pixels = image.pixels().to_vec();

        for pix in pixels.chunks_exact_mut(3) {
            pix[1] = (i16::from(pix[1]) + self.delta).clamp(0, 255) as u8;
        }
        PixelBuffer::from_vec(pixels, width, height, ColorSpace::HSV)
    }
}

/// Add `delta` to the saturation of an HSV image
///
/// # Errors
/// `InvalidParameter` if the image is not HSV
pub fn adjust_saturation(hsv: &PixelBuffer, delta: i16) -> Result<PixelBuffer, ImageErrors> {
    AdjustSaturation::new(delta).execute(hsv)
}
