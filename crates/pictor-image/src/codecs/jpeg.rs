/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "jpeg")]
//! JPEG support
//!
//! Decoding is done by `zune-jpeg`, encoding by `jpeg-encoder`
use jpeg_encoder::{ColorType, Encoder};

use crate::codecs::pixels_to_buffer;
use crate::colorspace::ColorSpace;
use crate::errors::ImageErrors;
use crate::image::PixelBuffer;
use crate::traits::{DecoderTrait, EncoderTrait};

/// A JPEG decoder over an in-memory buffer
pub struct JpegDecoder<'a> {
    inner: zune_jpeg::JpegDecoder<&'a [u8]>
}

impl<'a> JpegDecoder<'a> {
    pub fn new(data: &'a [u8]) -> JpegDecoder<'a> {
        JpegDecoder {
            inner: zune_jpeg::JpegDecoder::new(data)
        }
    }
}

impl<'a> DecoderTrait for JpegDecoder<'a> {
    fn decode(&mut self) -> Result<PixelBuffer, ImageErrors> {
        let pixels = self
            .inner
            .decode()
            .map_err(|e| ImageErrors::CorruptData(format!("jpeg: {e:?}")))?;

        let (width, height) = self.dimensions().ok_or_else(|| {
            ImageErrors::CorruptData("jpeg: missing image dimensions".to_string())
        })?;
        log::trace!("Decoded {width}x{height} jpeg");

        pixels_to_buffer(pixels, width, height)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.inner.dimensions()
    }

    fn name(&self) -> &'static str {
        "JPEG decoder"
    }
}

/// A baseline JPEG encoder
pub struct JpegEncoder {
    quality: u8
}

impl JpegEncoder {
    /// Create an encoder, quality is clamped to `1..=100`
    pub fn new(quality: u8) -> JpegEncoder {
        JpegEncoder {
            quality: quality.clamp(1, 100)
        }
    }
}

impl Default for JpegEncoder {
    fn default() -> Self {
        JpegEncoder::new(crate::codecs::DEFAULT_JPEG_QUALITY)
    }
}

impl EncoderTrait for JpegEncoder {
    fn name(&self) -> &'static str {
        "JPEG encoder"
    }

    fn encode(&mut self, image: &PixelBuffer) -> Result<Vec<u8>, ImageErrors> {
        let (width, height) = image.dimensions();

        let max_dimension = usize::from(u16::MAX);

        if width > max_dimension || height > max_dimension {
            return Err(ImageErrors::InvalidParameter(format!(
                "JPEG cannot store {width}x{height} images, limit is {max_dimension}x{max_dimension}"
            )));
        }
        let color_type = match image.colorspace() {
            ColorSpace::Luma => ColorType::Luma,
            ColorSpace::RGB => ColorType::Rgb,
            ColorSpace::RGBA => ColorType::Rgba,
            colorspace => {
                return Err(ImageErrors::UnsupportedFormat(format!(
                    "JPEG encoder cannot store {colorspace:?} images"
                )))
            }
        };
        let mut out = Vec::with_capacity(width * height);

        let encoder = Encoder::new(&mut out, self.quality);

        encoder
            .encode(image.pixels(), width as u16, height as u16, color_type)
            .map_err(|e| ImageErrors::InvalidParameter(format!("jpeg: {e:?}")))?;

        log::trace!("Encoded {width}x{height} jpeg into {} bytes", out.len());

        Ok(out)
    }
}
