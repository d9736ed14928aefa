/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![cfg(feature = "png")]
//! PNG support via `zune-png`
use zune_core::bit_depth::BitDepth;
use zune_core::options::EncoderOptions;
use zune_core::result::DecodingResult;

use crate::codecs::pixels_to_buffer;
use crate::errors::ImageErrors;
use crate::image::PixelBuffer;
use crate::traits::{DecoderTrait, EncoderTrait};

/// A PNG decoder over an in-memory buffer
///
/// Sixteen bit images are reduced to eight bits by keeping the
/// most significant byte
pub struct PngDecoder<'a> {
    inner: zune_png::PngDecoder<&'a [u8]>
}

impl<'a> PngDecoder<'a> {
    pub fn new(data: &'a [u8]) -> PngDecoder<'a> {
        PngDecoder {
            inner: zune_png::PngDecoder::new(data)
        }
    }
}

fn png_error(error: zune_png::error::PngDecodeErrors) -> ImageErrors {
    ImageErrors::CorruptData(format!("png: {error:?}"))
}

impl<'a> DecoderTrait for PngDecoder<'a> {
    fn decode(&mut self) -> Result<PixelBuffer, ImageErrors> {
        self.inner.decode_headers().map_err(png_error)?;

        let (width, height) = self.dimensions().ok_or_else(|| {
            ImageErrors::CorruptData("png: missing image dimensions".to_string())
        })?;

        let pixels = match self.inner.decode().map_err(png_error)? {
            DecodingResult::U8(data) => data,
            DecodingResult::U16(data) => data.iter().map(|x| (x >> 8) as u8).collect(),
            _ => {
                return Err(ImageErrors::CorruptData(
                    "png: unexpected sample type".to_string()
                ))
            }
        };
        log::trace!("Decoded {width}x{height} png");

        pixels_to_buffer(pixels, width, height)
    }

    fn dimensions(&self) -> Option<(usize, usize)> {
        self.inner.get_dimensions()
    }

    fn name(&self) -> &'static str {
        "PNG decoder"
    }
}

/// An eight bit PNG encoder
#[derive(Default)]
pub struct PngEncoder;

impl PngEncoder {
    pub fn new() -> PngEncoder {
        PngEncoder
    }
}

impl EncoderTrait for PngEncoder {
    fn name(&self) -> &'static str {
        "PNG encoder"
    }

    fn encode(&mut self, image: &PixelBuffer) -> Result<Vec<u8>, ImageErrors> {
        let (width, height) = image.dimensions();

        let colorspace = image.colorspace().to_zune().ok_or_else(|| {
            ImageErrors::UnsupportedFormat(format!(
                "PNG encoder cannot store {:?} images",
                image.colorspace()
            ))
        })?;
        let options = EncoderOptions::new(width, height, colorspace, BitDepth::Eight);

        let out = zune_png::PngEncoder::new(image.pixels(), options).encode();

        log::trace!("Encoded {width}x{height} png into {} bytes", out.len());

        Ok(out)
    }
}
