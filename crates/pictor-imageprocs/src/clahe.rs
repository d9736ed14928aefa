/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Contrast limited adaptive histogram equalization (CLAHE)
//!
//! The plane is split into a grid of tiles and every tile gets its own
//! equalization lookup table. Before building a table the tile histogram is
//! clipped at `clip_limit` (relative to a uniform histogram) and the clipped
//! excess is spread back evenly, which stops noise in flat regions from being
//! blown up. Every output pixel interpolates bilinearly between the tables of
//! the four nearest tile centres so tile seams do not show.
//!
//! When the plane does not divide evenly into tiles it is extended on the
//! right and bottom by mirroring before the histograms are built.
use log::trace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::pad::{pad_edges, PadMethod};
use crate::utils::{map_planes, round_u8};

const BINS: usize = 256;

/// Build the clipped equalization table of one tile
fn tile_lut(
    plane: &[u8], stride: usize, origin: (usize, usize), tile: (usize, usize), clip_limit: usize
) -> [u8; BINS] {
    let mut histogram = [0_usize; BINS];

    for row in plane[origin.1 * stride..]
        .chunks_exact(stride)
        .take(tile.1)
    {
        for v in &row[origin.0..origin.0 + tile.0] {
            histogram[usize::from(*v)] += 1;
        }
    }

    if clip_limit > 0 {
        let mut clipped = 0;
        for bin in &mut histogram {
            if *bin > clip_limit {
                clipped += *bin - clip_limit;
                *bin = clip_limit;
            }
        }
        let batch = clipped / BINS;
        let mut residual = clipped - batch * BINS;

        for bin in &mut histogram {
            *bin += batch;
        }
        if residual != 0 {
            let step = (BINS / residual).max(1);

            for bin in histogram.iter_mut().step_by(step) {
                if residual == 0 {
                    break;
                }
                *bin += 1;
                residual -= 1;
            }
        }
    }
    let scale = 255.0 / (tile.0 * tile.1) as f32;

    let mut lut = [0_u8; BINS];
    let mut sum = 0;
    for (entry, bin) in lut.iter_mut().zip(histogram) {
        sum += bin;
        *entry = round_u8(sum as f32 * scale);
    }
    lut
}

/// Equalize a single plane
///
/// Parameters are assumed to be validated
#[must_use]
pub fn clahe_plane(
    plane: &[u8], width: usize, height: usize, clip_limit: f32, tiles: (usize, usize)
) -> Vec<u8> {
    let (tiles_x, tiles_y) = tiles;

    let extra_x = (tiles_x - width % tiles_x) % tiles_x;
    let extra_y = (tiles_y - height % tiles_y) % tiles_y;

    let ext_w = width + extra_x;
    let ext_h = height + extra_y;

    let extended;
    let source: &[u8] = if extra_x == 0 && extra_y == 0 {
        plane
    } else {
        extended = pad_edges(
            plane,
            width,
            height,
            (0, extra_x),
            (0, extra_y),
            PadMethod::Reflect101
        );
        &extended
    };

    let tile_w = ext_w / tiles_x;
    let tile_h = ext_h / tiles_y;

    let clip = if clip_limit > 0.0 {
        ((clip_limit * (tile_w * tile_h) as f32 / BINS as f32) as usize).max(1)
    } else {
        0
    };
    trace!("CLAHE with {tiles_x}x{tiles_y} tiles of {tile_w}x{tile_h}, clip at {clip}");

    let mut luts = Vec::with_capacity(tiles_x * tiles_y);
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            luts.push(tile_lut(
                source,
                ext_w,
                (tx * tile_w, ty * tile_h),
                (tile_w, tile_h),
                clip
            ));
        }
    }
    let inv_tw = 1.0 / tile_w as f32;
    let inv_th = 1.0 / tile_h as f32;

    // horizontal neighbours and weights are the same for every row
    let columns: Vec<(usize, usize, f32)> = (0..width)
        .map(|x| {
            let txf = x as f32 * inv_tw - 0.5;
            let tx1 = txf.floor();
            let xa = txf - tx1;
            let tx1 = tx1 as isize;
            let left = tx1.max(0) as usize;
            let right = ((tx1 + 1) as usize).min(tiles_x - 1);
            (left, right, xa)
        })
        .collect();

    let mut out = vec![0_u8; width * height];

    for (y, out_row) in out.chunks_exact_mut(width).enumerate() {
        let tyf = y as f32 * inv_th - 0.5;
        let ty1 = tyf.floor();
        let ya = tyf - ty1;
        let ty1 = ty1 as isize;
        let top = ty1.max(0) as usize;
        let bottom = ((ty1 + 1) as usize).min(tiles_y - 1);

        let in_row = &plane[y * width..(y + 1) * width];

        for ((out_px, v), (left, right, xa)) in out_row.iter_mut().zip(in_row).zip(&columns) {
            let v = usize::from(*v);

            let lut = |tx: usize, ty: usize| f32::from(luts[ty * tiles_x + tx][v]);

            let res = (lut(*left, top) * (1.0 - xa) + lut(*right, top) * xa) * (1.0 - ya)
                + (lut(*left, bottom) * (1.0 - xa) + lut(*right, bottom) * xa) * ya;

            *out_px = round_u8(res);
        }
    }
    out
}

/// Local contrast enhancement
///
/// Operates on single channel images, use it on the lightness plane of a
/// LAB image to equalize a color image.
#[derive(Copy, Clone, Debug)]
pub struct Clahe {
    clip_limit: f32,
    tiles:      (usize, usize)
}

impl Clahe {
    /// Create a new CLAHE operation
    ///
    /// # Arguments
    /// - clip_limit: Contrast limit, `<= 0` disables clipping
    /// - tiles: Number of tiles horizontally and vertically, each at least 1
    #[must_use]
    pub fn new(clip_limit: f32, tiles: (usize, usize)) -> Clahe {
        Clahe { clip_limit, tiles }
    }
}

impl OperationsTrait for Clahe {
    fn name(&self) -> &'static str {
        "CLAHE"
    }

    fn supported_channels(&self) -> &'static [usize] {
        &[1]
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        let (tiles_x, tiles_y) = self.tiles;

        if tiles_x == 0 || tiles_y == 0 {
            return Err(ImageErrors::InvalidParameter(format!(
                "CLAHE tile grid must be at least 1x1, found {tiles_x}x{tiles_y}"
            )));
        }
        if !self.clip_limit.is_finite() {
            return Err(ImageErrors::InvalidParameter(format!(
                "CLAHE clip limit must be finite, found {}",
                self.clip_limit
            )));
        }
        let (width, height) = image.dimensions();

        map_planes(image, true, |plane| {
            clahe_plane(plane, width, height, self.clip_limit, self.tiles)
        })
    }
}

/// Equalize a single channel image
///
/// # Errors
/// - `InvalidChannelCount` if the image is not single channel
/// - `InvalidParameter` if a tile count is zero
pub fn local_contrast_enhance(
    channel: &PixelBuffer, clip_limit: f32, tiles: (usize, usize)
) -> Result<PixelBuffer, ImageErrors> {
    Clahe::new(clip_limit, tiles).execute(channel)
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::errors::ImageErrors;
    use pictor_image::image::PixelBuffer;

    use crate::clahe::local_contrast_enhance;

    #[test]
    fn constant_input_stays_constant() {
        for (w, h) in [(64, 64), (37, 23)] {
            let image = PixelBuffer::fill(90, ColorSpace::Luma, w, h).unwrap();
            let out = local_contrast_enhance(&image, 3.0, (8, 8)).unwrap();

            let first = out.pixels()[0];
            assert!(out.pixels().iter().all(|x| *x == first));
        }
    }

    #[test]
    fn stretches_low_contrast() {
        let image = PixelBuffer::from_fn(64, 64, ColorSpace::Luma, |x, y, pix| {
            pix[0] = 100 + ((x + y) % 20) as u8;
        })
        .unwrap();
        let out = local_contrast_enhance(&image, 40.0, (2, 2)).unwrap();

        let range = |p: &[u8]| {
            p.iter().max().copied().unwrap_or(0) - p.iter().min().copied().unwrap_or(0)
        };
        assert!(range(out.pixels()) > range(image.pixels()));
    }

    #[test]
    fn handles_tiny_and_odd_sizes() {
        let mut pixels = vec![0; 5 * 3];
        nanorand::WyRand::new_seed(8).fill(&mut pixels);
        let image = PixelBuffer::from_vec(pixels, 5, 3, ColorSpace::Luma).unwrap();

        let out = local_contrast_enhance(&image, 3.0, (8, 8)).unwrap();
        assert_eq!(out.dimensions(), (5, 3));
    }

    #[test]
    fn rejects_bad_input() {
        let gray = PixelBuffer::fill(0, ColorSpace::Luma, 8, 8).unwrap();
        assert!(matches!(
            local_contrast_enhance(&gray, 3.0, (0, 8)),
            Err(ImageErrors::InvalidParameter(_))
        ));
        let rgb = PixelBuffer::fill(0, ColorSpace::RGB, 8, 8).unwrap();
        assert!(matches!(
            local_contrast_enhance(&rgb, 3.0, (8, 8)),
            Err(ImageErrors::InvalidChannelCount(1, 3))
        ));
    }
}
