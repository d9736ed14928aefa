/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during image processing
use std::fmt::{Debug, Display, Formatter};

/// All possible image errors that can occur.
///
/// This covers decoding, processing and encoding. Every variant is a
/// local, recoverable condition, operations validate their inputs and
/// return one of these before touching any pixel.
pub enum ImageErrors {
    /// Wrong number of channels for an operation
    ///
    /// Fields are the expected and the found channel count
    InvalidChannelCount(usize, usize),
    /// A parameter is out of range, e.g. an even kernel size
    InvalidParameter(String),
    /// Two images that should share dimensions do not
    ///
    /// Fields are the `(width,height)` of the first and second image
    DimensionMismatch((usize, usize), (usize, usize)),
    /// The image format is not recognised or not compiled in
    UnsupportedFormat(String),
    /// The bytes claim to be a known format but fail to decode
    CorruptData(String),
    /// A filter name that is not in the catalog
    UnknownFilter(String)
}

impl Debug for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidChannelCount(expected, found) => {
                writeln!(f, "Expected {expected} channels but found {found}")
            }
            Self::InvalidParameter(reason) => {
                writeln!(f, "Invalid parameter: {reason}")
            }
            Self::DimensionMismatch(first, second) => {
                writeln!(
                    f,
                    "Dimensions mismatch, first image is {}x{} but second is {}x{}",
                    first.0, first.1, second.0, second.1
                )
            }
            Self::UnsupportedFormat(format) => {
                writeln!(f, "Unsupported format: {format}")
            }
            Self::CorruptData(reason) => {
                writeln!(f, "Corrupt image data: {reason}")
            }
            Self::UnknownFilter(name) => {
                writeln!(f, "Unknown filter {name:?}")
            }
        }
    }
}

impl Display for ImageErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ImageErrors {}
