/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Traits shared by decoders, encoders and image operations
use crate::errors::ImageErrors;
use crate::image::PixelBuffer;

/// Encapsulates an image decoder.
///
/// All supported image decoders must implement this trait
pub trait DecoderTrait {
    /// Decode the buffer the decoder was created with
    ///
    /// # Errors
    /// `CorruptData` when the underlying decoder fails
    fn decode(&mut self) -> Result<PixelBuffer, ImageErrors>;

    /// Get width and height of the image
    ///
    /// # Returns
    /// - Some(width,height)
    /// - None -> If headers haven't been decoded and we can't extract
    ///  the width and height.
    fn dimensions(&self) -> Option<(usize, usize)>;

    /// Get the name of the decoder
    fn name(&self) -> &'static str;
}

/// Encapsulates an image encoder.
pub trait EncoderTrait {
    /// Get the name of the encoder
    fn name(&self) -> &'static str;

    /// Encode an image returning the encoded bytes
    ///
    /// The image is expected to be in a layout the encoder understands,
    /// i.e. Luma, RGB or RGBA
    ///
    /// # Errors
    /// `UnsupportedFormat` for layouts the format cannot store,
    /// `InvalidParameter` for images too large for the format
    fn encode(&mut self, image: &PixelBuffer) -> Result<Vec<u8>, ImageErrors>;
}

/// This encapsulates an image operation.
///
/// Operations never modify their input, they borrow an image and
/// return a new one with the same width and height.
pub trait OperationsTrait {
    /// Get the name of this operation
    fn name(&self) -> &'static str;

    /// Run the operation, the channel count has already been checked
    ///
    /// # Errors
    /// Any operation specific error
    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors>;

    /// Channel counts this operation accepts
    fn supported_channels(&self) -> &'static [usize] {
        &[1, 3, 4]
    }

    /// Execute the operation on an image
    ///
    /// This checks that the image has a supported number of channels
    /// and then calls [`execute_impl`](Self::execute_impl)
    ///
    /// # Errors
    /// - `InvalidChannelCount` if the channel count is not supported
    /// - Any error the operation returns
    fn execute(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        let channels = image.channels();
        let supported = self.supported_channels();

        if !supported.contains(&channels) {
            // report the closest count we would have accepted
            let expected = supported.first().copied().unwrap_or(0);
            return Err(ImageErrors::InvalidChannelCount(expected, channels));
        }
        let (width, height) = image.dimensions();

        log::trace!("Running {} on a {width}x{height} image", self.name());

        self.execute_impl(image)
    }
}
