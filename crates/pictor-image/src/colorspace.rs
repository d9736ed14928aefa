/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Colorspaces a [`PixelBuffer`](crate::image::PixelBuffer) can be tagged with

/// Supported colorspaces
///
/// The colorspace decides how many interleaved samples make up a single
/// pixel, and how those samples should be read.
///
/// All three channel spaces other than [`RGB`](ColorSpace::RGB) follow the
/// 8-bit conventions used by most computer vision libraries:
///
/// - `LAB`: `L` scaled to `[0,255]`, `a` and `b` offset by 128
/// - `HSV`: hue in `[0,180)`, saturation and value in `[0,255]`
/// - `YCrCb`: BT.601 luma, chroma offset by 128
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde-support", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSpace {
    /// Single channel grayscale
    Luma,
    /// Red, green, blue. The canonical form filters work in
    RGB,
    /// Red, green and blue with a trailing alpha channel
    RGBA,
    /// CIE L*a*b*
    LAB,
    /// Hue, saturation, value
    HSV,
    /// Luma with red and blue difference chroma
    YCrCb
}

impl ColorSpace {
    /// Number of interleaved samples per pixel
    #[must_use]
    pub const fn num_components(self) -> usize {
        match self {
            Self::Luma => 1,
            Self::RGB | Self::LAB | Self::HSV | Self::YCrCb => 3,
            Self::RGBA => 4
        }
    }

    /// Whether the last channel carries alpha
    #[must_use]
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::RGBA)
    }

    /// Number of channels excluding alpha
    #[must_use]
    pub const fn color_components(self) -> usize {
        if self.has_alpha() {
            self.num_components() - 1
        } else {
            self.num_components()
        }
    }

    /// The layout this colorspace has for encoders
    ///
    /// Returns `None` for spaces that have to be converted to RGB
    /// before they can be written out
    #[must_use]
    pub const fn to_zune(self) -> Option<zune_core::colorspace::ColorSpace> {
        use zune_core::colorspace::ColorSpace as Zune;

        match self {
            Self::Luma => Some(Zune::Luma),
            Self::RGB => Some(Zune::RGB),
            Self::RGBA => Some(Zune::RGBA),
            _ => None
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
