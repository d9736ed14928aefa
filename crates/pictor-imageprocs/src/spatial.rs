/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Spatial operations on planes
//!
//! spatial goes through each pixel collecting its neighbors into a window and
//! reducing that window to one value with the function provided.
//!
//! The parameter radius corresponds to the radius of the neighbor area to be searched,
//! for example a radius of R will result in a search window length of 2R+1 for each dimension.
use crate::pad::{pad, PadMethod};

/// Run `function` over every `(2R+1)x(2R+1)` window of a plane
///
/// # Arguments
///
/// - in_channel: input plane, **not** padded, borders are produced with `method`
/// - width, height: dimensions of the plane
/// - radius: a radius of R will result in a search window length of 2R+1
/// - function: called with the window in row major order, returns the output
///   sample for the window centre
///
/// # Returns
/// A plane of `width*height` samples
pub fn spatial<T, O, F>(
    in_channel: &[T], width: usize, height: usize, radius: usize, method: PadMethod, function: F
) -> Vec<O>
where
    T: Default + Copy,
    O: Default + Copy,
    F: Fn(&[T]) -> O
{
    let padded = pad(in_channel, width, height, radius, radius, method);
    let padded_w = width + 2 * radius;

    let window_len = 2 * radius + 1;
    let mut window = vec![T::default(); window_len * window_len];

    let mut out = vec![O::default(); width * height];

    for (y, out_row) in out.chunks_exact_mut(width).enumerate() {
        for (x, out_px) in out_row.iter_mut().enumerate() {
            for (ky, window_row) in window.chunks_exact_mut(window_len).enumerate() {
                let start = (y + ky) * padded_w + x;
                window_row.copy_from_slice(&padded[start..start + window_len]);
            }
            *out_px = function(&window);
        }
    }
    out
}
