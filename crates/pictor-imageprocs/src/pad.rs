/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Methods used for duplicating pixels around the border
//!
//! Window operations read `radius` pixels past every edge, padding the
//! plane first lets the inner loops index without bounds juggling.

/// Padding method to use
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PadMethod {
    /// Create a border filled with `T::default()`
    Constant,
    /// Create a border that duplicates the current pixel
    /// at the original image border to the new border
    ///
    /// ```text
    ///  a,b,c
    ///  d,e,f
    /// ```
    /// Becomes
    /// ```text
    /// a a,b,c c
    /// a a,b,c c
    /// d d,e,f f
    /// d d,e,f f
    /// ```
    Replicate,
    /// Mirror the pixels without repeating the edge pixel
    ///
    /// ```text
    ///  a,b,c
    /// ```
    /// Becomes
    /// ```text
    /// b a,b,c b
    /// ```
    Reflect101
}

/// Map a coordinate that may lie outside `0..len` back inside
#[inline]
#[must_use]
pub fn border_index(coord: isize, len: usize, method: PadMethod) -> Option<usize> {
    let last = len as isize - 1;

    match method {
        PadMethod::Constant => (0..=last).contains(&coord).then_some(coord as usize),
        PadMethod::Replicate => Some(coord.clamp(0, last) as usize),
        PadMethod::Reflect101 => {
            if last == 0 {
                return Some(0);
            }
            let period = 2 * last;
            let mut c = coord.rem_euclid(period);
            if c > last {
                c = period - c;
            }
            Some(c as usize)
        }
    }
}

/// Pad a single plane creating a border around the actual pixels
///
/// # Arguments
///  - pixels: Un-padded plane
///  - width, height: Dimensions of the plane
///  - pad_x: Columns added on the left and on the right
///  - pad_y: Rows added on the top and on the bottom
///  - method: How border pixels are produced
///
/// # Returns
///  - A vec of `(width + 2*pad_x) * (height + 2*pad_y)` samples
#[must_use]
pub fn pad<T: Copy + Default>(
    pixels: &[T], width: usize, height: usize, pad_x: usize, pad_y: usize, method: PadMethod
) -> Vec<T> {
    pad_edges(pixels, width, height, (pad_x, pad_x), (pad_y, pad_y), method)
}

/// Pad with possibly different amounts on each side
///
/// `x` is `(left,right)` and `y` is `(top,bottom)`
#[must_use]
pub fn pad_edges<T: Copy + Default>(
    pixels: &[T], width: usize, height: usize, x: (usize, usize), y: (usize, usize),
    method: PadMethod
) -> Vec<T> {
    assert_eq!(pixels.len(), width * height, "Plane does not match its dimensions");

    let padded_w = width + x.0 + x.1;
    let padded_h = height + y.0 + y.1;

    let mut out = vec![T::default(); padded_w * padded_h];

    // source column for each output column, computed once
    let columns: Vec<Option<usize>> = (0..padded_w)
        .map(|c| border_index(c as isize - x.0 as isize, width, method))
        .collect();

    for (row, out_row) in out.chunks_exact_mut(padded_w).enumerate() {
        let Some(src_y) = border_index(row as isize - y.0 as isize, height, method) else {
            continue;
        };
        let src_row = &pixels[src_y * width..(src_y + 1) * width];

        for (out_px, src_x) in out_row.iter_mut().zip(&columns) {
            if let Some(src_x) = src_x {
                *out_px = src_row[*src_x];
            }
        }
    }
    out
}
