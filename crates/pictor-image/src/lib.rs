/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An in-memory image type and the plumbing around it.
//!
//! This crate holds the [`PixelBuffer`](image::PixelBuffer) every pictor
//! operation consumes and produces, colorspace conversions between RGB,
//! grayscale, LAB, HSV and YCrCb, the error type shared by the workspace and
//! the PNG/JPEG codecs used at the edges of a pipeline.
//!
//! # Example
//! - Decode, convert to grayscale and encode again
//! ```no_run
//! use pictor_image::codecs::{decode, encode, ImageFormat};
//! use pictor_image::colorspace::ColorSpace;
//! use pictor_image::errors::ImageErrors;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode(&bytes)?;
//! let gray = image.convert_color(ColorSpace::Luma)?;
//! let encoded = encode(&gray, ImageFormat::PNG)?;
//! # Ok::<(), ImageErrors>(())
//! ```
#![warn(
    clippy::correctness,
    clippy::perf,
    clippy::pedantic,
    clippy::inline_always,
    clippy::missing_errors_doc,
    clippy::panic
)]
#![allow(
    clippy::needless_return,
    clippy::similar_names,
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

pub mod codecs;
pub mod colorspace;
pub mod conversions;
pub mod deinterleave;
pub mod errors;
pub mod image;
pub mod traits;
