/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(unused_imports, unused)]

use std::path::{Path, PathBuf};

use nanorand::Rng;
use pictor_image::colorspace::ColorSpace;
use pictor_image::image::PixelBuffer;
use serde::Deserialize;
use xxhash_rust::xxh3::xxh3_128;

mod codecs;
mod filters;
mod primitives;

/// One alias the filter catalog must resolve
#[derive(Clone, Deserialize, Debug)]
pub struct NameEntry {
    pub name:    String,
    /// Expected slug, `None` when the name must be rejected
    pub filter:  Option<String>,
    pub comment: Option<String>
}

pub fn json_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join(name)
}

fn hash(contents: &[u8]) -> u128 {
    xxh3_128(contents)
}

/// Smooth color ramp, friendly to lossy codecs
pub fn gradient(width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, ColorSpace::RGB, |x, y, pix| {
        pix[0] = (x * 255 / width.max(2).saturating_sub(1)).min(255) as u8;
        pix[1] = (y * 255 / height.max(2).saturating_sub(1)).min(255) as u8;
        pix[2] = 128;
    })
    .unwrap()
}

pub fn random_image(width: usize, height: usize, colorspace: ColorSpace, seed: u64) -> PixelBuffer {
    let mut pixels = vec![0; width * height * colorspace.num_components()];
    nanorand::WyRand::new_seed(seed).fill(&mut pixels);

    PixelBuffer::from_vec(pixels, width, height, colorspace).unwrap()
}

/// Black and white squares of `cell` pixels
pub fn checkerboard(width: usize, height: usize, cell: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, ColorSpace::RGB, |x, y, pix| {
        let v = if (x / cell + y / cell) % 2 == 0 { 0 } else { 255 };
        pix.fill(v);
    })
    .unwrap()
}
