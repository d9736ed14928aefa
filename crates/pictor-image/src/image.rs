/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The in-memory image representation
//!
//! A [`PixelBuffer`] is a width, a height, a colorspace and a single
//! contiguous vector of interleaved 8-bit samples.
//!
//! Buffers are never modified in place by operations, every operation
//! borrows its input and returns a new buffer, so the original can still be
//! shown next to the result.
use crate::colorspace::ColorSpace;
use crate::conversions::convert;
use crate::deinterleave::{deinterleave, interleave};
use crate::errors::ImageErrors;

/// An interleaved 8-bit image
///
/// # Invariants
/// - `width > 0` and `height > 0`
/// - `pixels.len() == width * height * colorspace.num_components()`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PixelBuffer {
    pixels:     Vec<u8>,
    width:      usize,
    height:     usize,
    colorspace: ColorSpace
}

fn check_dimensions(
    len: usize, width: usize, height: usize, colorspace: ColorSpace
) -> Result<(), ImageErrors> {
    if width == 0 || height == 0 {
        return Err(ImageErrors::InvalidParameter(format!(
            "Image dimensions must be positive, found {width}x{height}"
        )));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|x| x.checked_mul(colorspace.num_components()))
        .ok_or_else(|| {
            ImageErrors::InvalidParameter(format!(
                "Image dimensions {width}x{height} overflow a buffer"
            ))
        })?;

    if expected != len {
        return Err(ImageErrors::InvalidParameter(format!(
            "Expected {expected} samples for a {width}x{height} {colorspace:?} image but found {len}"
        )));
    }
    Ok(())
}

impl PixelBuffer {
    /// Create an image from an owned vector of interleaved samples
    ///
    /// # Errors
    /// `InvalidParameter` if a dimension is zero or the length does not
    /// match `width * height * colorspace.num_components()`
    pub fn from_vec(
        pixels: Vec<u8>, width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<PixelBuffer, ImageErrors> {
        check_dimensions(pixels.len(), width, height, colorspace)?;

        Ok(PixelBuffer {
            pixels,
            width,
            height,
            colorspace
        })
    }

    /// Create an image by copying interleaved samples
    ///
    /// # Errors
    /// See [`from_vec`](Self::from_vec)
    pub fn from_u8(
        pixels: &[u8], width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<PixelBuffer, ImageErrors> {
        Self::from_vec(pixels.to_vec(), width, height, colorspace)
    }

    /// Create an image where every sample has the same value
    ///
    /// # Errors
    /// `InvalidParameter` if a dimension is zero
    pub fn fill(
        value: u8, colorspace: ColorSpace, width: usize, height: usize
    ) -> Result<PixelBuffer, ImageErrors> {
        let len = width
            .saturating_mul(height)
            .saturating_mul(colorspace.num_components());

        Self::from_vec(vec![value; len], width, height, colorspace)
    }

    /// Create an image from a function called once per pixel
    ///
    /// The function receives `x`, `y` and the samples of that pixel
    ///
    /// # Example
    /// ```
    /// use pictor_image::colorspace::ColorSpace;
    /// use pictor_image::image::PixelBuffer;
    /// // horizontal gradient
    /// let image = PixelBuffer::from_fn(100, 10, ColorSpace::Luma, |x, _, pix| {
    ///     pix[0] = (x * 2) as u8;
    /// }).unwrap();
    /// assert_eq!(image.pixel(50, 3), &[100]);
    /// ```
    ///
    /// # Errors
    /// `InvalidParameter` if a dimension is zero
    pub fn from_fn<F>(
        width: usize, height: usize, colorspace: ColorSpace, mut func: F
    ) -> Result<PixelBuffer, ImageErrors>
    where
        F: FnMut(usize, usize, &mut [u8])
    {
        let mut image = Self::fill(0, colorspace, width, height)?;
        let components = colorspace.num_components();

        for (y, row) in image
            .pixels
            .chunks_exact_mut(width * components)
            .enumerate()
        {
            for (x, pix) in row.chunks_exact_mut(components).enumerate() {
                func(x, y, pix);
            }
        }
        Ok(image)
    }

    /// Create an image from separate channel planes
    ///
    /// # Errors
    /// - `InvalidChannelCount` if the number of planes does not match the colorspace
    /// - `InvalidParameter` if a plane does not hold `width * height` samples
    pub fn from_channels<P: AsRef<[u8]>>(
        planes: &[P], width: usize, height: usize, colorspace: ColorSpace
    ) -> Result<PixelBuffer, ImageErrors> {
        if planes.len() != colorspace.num_components() {
            return Err(ImageErrors::InvalidChannelCount(
                colorspace.num_components(),
                planes.len()
            ));
        }
        for plane in planes {
            check_dimensions(plane.as_ref().len(), width, height, ColorSpace::Luma)?;
        }
        Self::from_vec(interleave(planes), width, height, colorspace)
    }

    /// Get image dimensions as a tuple of (width,height)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get the colorspace this image is stored in
    #[must_use]
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Number of interleaved samples per pixel
    #[must_use]
    pub const fn channels(&self) -> usize {
        self.colorspace.num_components()
    }

    /// The raw interleaved samples
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the image returning its samples
    #[must_use]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Samples of the pixel at `(x,y)`
    ///
    /// # Panics
    /// If the coordinates are outside the image
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        assert!(x < self.width && y < self.height, "({x},{y}) is out of bounds");

        let components = self.channels();
        let start = (y * self.width + x) * components;

        &self.pixels[start..start + components]
    }

    /// Split the image into one plane per channel, alpha included
    #[must_use]
    pub fn channels_vec(&self) -> Vec<Vec<u8>> {
        deinterleave(&self.pixels, self.channels())
    }

    /// Re-tag the samples with another colorspace of the same width
    ///
    /// # Errors
    /// `InvalidChannelCount` if the channel counts differ
    pub fn with_colorspace(mut self, colorspace: ColorSpace) -> Result<PixelBuffer, ImageErrors> {
        if colorspace.num_components() != self.channels() {
            return Err(ImageErrors::InvalidChannelCount(
                colorspace.num_components(),
                self.channels()
            ));
        }
        self.colorspace = colorspace;
        Ok(self)
    }

    /// Convert to a different colorspace returning a new image
    ///
    /// # Errors
    /// See [`convert`]
    pub fn convert_color(&self, to: ColorSpace) -> Result<PixelBuffer, ImageErrors> {
        convert(self, self.colorspace, to)
    }

    /// Bring the image to the canonical three channel RGB form
    ///
    /// Gray is replicated, alpha dropped and every other space converted.
    ///
    /// # Errors
    /// See [`convert`]
    pub fn to_rgb(&self) -> Result<PixelBuffer, ImageErrors> {
        self.convert_color(ColorSpace::RGB)
    }

    /// Fail with `DimensionMismatch` unless `other` has the same width and height
    ///
    /// # Errors
    /// `DimensionMismatch`
    pub fn check_same_dimensions(&self, other: &PixelBuffer) -> Result<(), ImageErrors> {
        if self.dimensions() != other.dimensions() {
            return Err(ImageErrors::DimensionMismatch(
                self.dimensions(),
                other.dimensions()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::colorspace::ColorSpace;
    use crate::errors::ImageErrors;
    use crate::image::PixelBuffer;

    #[test]
    fn rejects_wrong_length() {
        let err = PixelBuffer::from_vec(vec![0; 11], 2, 2, ColorSpace::RGB).unwrap_err();
        assert!(matches!(err, ImageErrors::InvalidParameter(_)));
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(PixelBuffer::fill(0, ColorSpace::RGB, 0, 10).is_err());
        assert!(PixelBuffer::fill(0, ColorSpace::RGB, 10, 0).is_err());
    }

    #[test]
    fn from_fn_writes_every_pixel() {
        let image = PixelBuffer::from_fn(4, 3, ColorSpace::RGB, |x, y, pix| {
            pix[0] = x as u8;
            pix[1] = y as u8;
            pix[2] = 9;
        })
        .unwrap();

        assert_eq!(image.pixel(3, 2), &[3, 2, 9]);
        assert_eq!(image.pixel(0, 1), &[0, 1, 9]);
    }

    #[test]
    fn planes_round_trip() {
        let image = PixelBuffer::from_fn(5, 5, ColorSpace::RGBA, |x, y, pix| {
            pix.copy_from_slice(&[x as u8, y as u8, 7, 255]);
        })
        .unwrap();
        let planes = image.channels_vec();
        let back = PixelBuffer::from_channels(&planes, 5, 5, ColorSpace::RGBA).unwrap();
        assert_eq!(back, image);
    }

    #[test]
    fn from_channels_checks_plane_count() {
        let plane = vec![0_u8; 4];
        let err = PixelBuffer::from_channels(&[plane], 2, 2, ColorSpace::RGB).unwrap_err();
        assert!(matches!(err, ImageErrors::InvalidChannelCount(3, 1)));
    }
}
