/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Entry point for all supported codecs the library understands
//!
//! Codecs sit at the two edges of a pipeline, bytes are decoded into a
//! [`PixelBuffer`], filtered, and encoded back.
//!
//! The codecs can be enabled and disabled via the `jpeg` and `png` features,
//! asking for a format whose codec was compiled out is an
//! [`UnsupportedFormat`](ImageErrors::UnsupportedFormat) error.
//!
//! # Note on compatibility
//! Encoders understand Luma, RGB and RGBA. Images in any other colorspace
//! are converted to RGB on a copy before encoding, the image passed in is
//! left as is.
use std::str::FromStr;

use crate::colorspace::ColorSpace;
use crate::errors::ImageErrors;
use crate::image::PixelBuffer;
use crate::traits::{DecoderTrait, EncoderTrait};

pub mod jpeg;
pub mod png;

/// Quality used by the JPEG encoder unless configured otherwise
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// All supported image formats
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum ImageFormat {
    /// Joint Photographic Experts Group
    JPEG,
    /// Portable Network Graphics
    PNG,
    /// Any unknown format
    Unknown
}

/// Options handed to encoders
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct EncoderConfig {
    /// JPEG quality, 1-100. Ignored by lossless formats
    pub quality: u8
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            quality: DEFAULT_JPEG_QUALITY
        }
    }
}

impl ImageFormat {
    /// Guess the format of an encoded image from its first bytes
    ///
    /// Returns [`ImageFormat::Unknown`] when no signature matches
    #[must_use]
    pub fn guess_format(bytes: &[u8]) -> ImageFormat {
        const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

        if bytes.starts_with(&PNG_SIGNATURE) {
            return ImageFormat::PNG;
        }
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return ImageFormat::JPEG;
        }
        ImageFormat::Unknown
    }

    /// Map a file extension (without the dot, any case) to a format
    #[must_use]
    pub fn from_extension<P: AsRef<str>>(extension: P) -> ImageFormat {
        match extension.as_ref().to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "jpe" | "jfif" => ImageFormat::JPEG,
            "png" => ImageFormat::PNG,
            _ => ImageFormat::Unknown
        }
    }

    /// Return true if this format was compiled with a decoder
    #[must_use]
    pub const fn has_decoder(self) -> bool {
        match self {
            ImageFormat::JPEG => cfg!(feature = "jpeg"),
            ImageFormat::PNG => cfg!(feature = "png"),
            ImageFormat::Unknown => false
        }
    }

    /// Return true if an image format has an encoder that can convert the image
    /// into that format
    #[must_use]
    pub const fn has_encoder(self) -> bool {
        self.has_decoder()
    }

    /// Decode `data` assuming it is in this format
    ///
    /// # Errors
    /// - `UnsupportedFormat` for `Unknown` or a codec compiled out
    /// - `CorruptData` if decoding fails
    pub fn decode(self, data: &[u8]) -> Result<PixelBuffer, ImageErrors> {
        match self {
            ImageFormat::JPEG => {
                #[cfg(feature = "jpeg")]
                {
                    return jpeg::JpegDecoder::new(data).decode();
                }
            }
            ImageFormat::PNG => {
                #[cfg(feature = "png")]
                {
                    return png::PngDecoder::new(data).decode();
                }
            }
            ImageFormat::Unknown => {}
        }
        Err(ImageErrors::UnsupportedFormat(format!(
            "No decoder for format {self:?}"
        )))
    }

    /// Encode `image` into this format
    ///
    /// # Errors
    /// - `UnsupportedFormat` for `Unknown` or a codec compiled out
    /// - Any error from the encoder
    pub fn encode(self, image: &PixelBuffer, config: EncoderConfig) -> Result<Vec<u8>, ImageErrors> {
        // encoders only understand the storage layouts
        let converted;
        let image = if image.colorspace().to_zune().is_none() {
            converted = image.to_rgb()?;
            &converted
        } else {
            image
        };

        match self {
            ImageFormat::JPEG => {
                #[cfg(feature = "jpeg")]
                {
                    let mut encoder = jpeg::JpegEncoder::new(config.quality);
                    return encoder.encode(image);
                }
            }
            ImageFormat::PNG => {
                #[cfg(feature = "png")]
                {
                    let mut encoder = png::PngEncoder::new();
                    return encoder.encode(image);
                }
            }
            ImageFormat::Unknown => {}
        }
        let _ = config;

        Err(ImageErrors::UnsupportedFormat(format!(
            "No encoder for format {self:?}"
        )))
    }
}

impl FromStr for ImageFormat {
    type Err = ImageErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ImageFormat::from_extension(s.trim_start_matches('.')) {
            ImageFormat::Unknown => Err(ImageErrors::UnsupportedFormat(s.to_string())),
            format => Ok(format)
        }
    }
}

/// Decode an image in any supported format
///
/// The format is detected from the leading bytes
///
/// # Errors
/// - `UnsupportedFormat` if the bytes match no known signature
/// - `CorruptData` if decoding fails
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, ImageErrors> {
    let format = ImageFormat::guess_format(bytes);

    if format == ImageFormat::Unknown {
        return Err(ImageErrors::UnsupportedFormat(
            "Could not determine image format from its contents".to_string()
        ));
    }
    log::debug!("Decoding {} bytes as {format:?}", bytes.len());

    format.decode(bytes)
}

/// Encode an image using default encoder options
///
/// # Errors
/// See [`ImageFormat::encode`]
pub fn encode(image: &PixelBuffer, format: ImageFormat) -> Result<Vec<u8>, ImageErrors> {
    encode_with_options(image, format, EncoderConfig::default())
}

/// Encode an image with explicit encoder options
///
/// # Errors
/// See [`ImageFormat::encode`]
pub fn encode_with_options(
    image: &PixelBuffer, format: ImageFormat, config: EncoderConfig
) -> Result<Vec<u8>, ImageErrors> {
    let (width, height) = image.dimensions();
    log::debug!("Encoding {width}x{height} {} image as {format:?}", image.colorspace());

    format.encode(image, config)
}

/// Reduce a decoded sample buffer to one of our storage layouts
///
/// Decoders may hand back gray+alpha, which is expanded to RGBA
pub(crate) fn pixels_to_buffer(
    pixels: Vec<u8>, width: usize, height: usize
) -> Result<PixelBuffer, ImageErrors> {
    let area = width.saturating_mul(height);

    if area == 0 || pixels.len() % area != 0 {
        return Err(ImageErrors::CorruptData(format!(
            "Decoder returned {} samples for a {width}x{height} image",
            pixels.len()
        )));
    }
    match pixels.len() / area {
        1 => PixelBuffer::from_vec(pixels, width, height, ColorSpace::Luma),
        2 => {
            let mut rgba = Vec::with_capacity(area * 4);
            for luma_alpha in pixels.chunks_exact(2) {
                let (l, a) = (luma_alpha[0], luma_alpha[1]);
                rgba.extend_from_slice(&[l, l, l, a]);
            }
            PixelBuffer::from_vec(rgba, width, height, ColorSpace::RGBA)
        }
        3 => PixelBuffer::from_vec(pixels, width, height, ColorSpace::RGB),
        4 => PixelBuffer::from_vec(pixels, width, height, ColorSpace::RGBA),
        n => Err(ImageErrors::CorruptData(format!(
            "Unsupported number of decoded channels {n}"
        )))
    }
}
