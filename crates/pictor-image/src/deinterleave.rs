/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Split interleaved pixels into planes and join them back
//!
//! Most spatial operations work on a single channel at a time, so pixels
//! stored as `[R,G,B,R,G,B...]` are first split into `[R,R..]`, `[G,G..]`,
//! `[B,B..]`, processed and then interleaved again.

/// Split interleaved samples into `components` separate planes
///
/// # Panics
/// If `components` is zero
#[must_use]
pub fn deinterleave(pixels: &[u8], components: usize) -> Vec<Vec<u8>> {
    assert_ne!(components, 0, "Cannot deinterleave zero components");

    let plane_size = pixels.len() / components;

    let mut planes = vec![Vec::with_capacity(plane_size); components];

    for pixel in pixels.chunks_exact(components) {
        for (plane, sample) in planes.iter_mut().zip(pixel) {
            plane.push(*sample);
        }
    }
    planes
}

/// Join planes of equal length into one interleaved buffer
///
/// Extra samples in longer planes are ignored, the output has
/// `shortest_plane * planes.len()` samples
#[must_use]
pub fn interleave<P: AsRef<[u8]>>(planes: &[P]) -> Vec<u8> {
    let components = planes.len();

    if components == 0 {
        return Vec::new();
    }
    if components == 1 {
        return planes[0].as_ref().to_vec();
    }
    let plane_size = planes
        .iter()
        .map(|x| x.as_ref().len())
        .min()
        .unwrap_or(0);

    let mut out = vec![0_u8; plane_size * components];

    for (c, plane) in planes.iter().enumerate() {
        for (out_pix, sample) in out
            .chunks_exact_mut(components)
            .zip(plane.as_ref().iter())
        {
            out_pix[c] = *sample;
        }
    }
    out
}
