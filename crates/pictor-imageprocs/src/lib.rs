/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Image processing routines for `pictor`
//!
//! This implements the primitives stylistic filters are built from,
//! smoothing, edge extraction, tone mapping and compositing, and the
//! [`catalog`] that chains them into the six named filters.
//!
//! Primitives implement the `OperationsTrait` defined by pictor-image and
//! most also have a plain function form.
//!
//! # Example
//! - Apply the sepia filter to a gray image
//! ```
//! use pictor_image::colorspace::ColorSpace;
//! use pictor_image::errors::ImageErrors;
//! use pictor_image::image::PixelBuffer;
//! use pictor_imageprocs::catalog::apply_filter;
//!
//! let image = PixelBuffer::fill(128, ColorSpace::RGB, 100, 100)?;
//! let sepia = apply_filter(&image, "Sepia Effect")?;
//!
//! assert_eq!(sepia.dimensions(), (100, 100));
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
    clippy::inline_always,
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc,
    clippy::wildcard_imports,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::many_single_char_names
)]

pub mod bilateral_filter;
pub mod blend;
pub mod canny;
pub mod catalog;
pub mod clahe;
pub mod color_matrix;
pub mod composite;
pub mod convolve;
pub mod divide;
pub mod domain_transform;
pub mod gaussian_blur;
pub mod hsv_adjust;
pub mod invert;
pub mod median;
pub mod pad;
pub mod sobel;
pub mod spatial;
pub mod threshold;
mod utils;
pub mod vignette;
