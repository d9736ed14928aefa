/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::trace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;

/// Run `function` on every channel plane of `image` and reassemble the result
///
/// With `include_alpha` false an alpha plane is copied through untouched.
/// Planes are processed on scoped threads when the `threads` feature is on.
pub(crate) fn map_planes<F>(
    image: &PixelBuffer, include_alpha: bool, function: F
) -> Result<PixelBuffer, ImageErrors>
where
    F: Fn(&[u8]) -> Vec<u8> + Sync
{
    let (width, height) = image.dimensions();
    let colorspace = image.colorspace();

    let mut planes = image.channels_vec();

    let process = if include_alpha {
        planes.len()
    } else {
        colorspace.color_components()
    };

    #[cfg(not(feature = "threads"))]
    let results: Vec<Vec<u8>> = {
        trace!("Processing {process} planes in single threaded mode");

        planes[..process].iter().map(|plane| function(plane)).collect()
    };

    #[cfg(feature = "threads")]
    let results: Vec<Vec<u8>> = {
        trace!("Processing {process} planes in multithreaded mode");

        std::thread::scope(|s| {
            let handles: Vec<_> = planes[..process]
                .iter()
                .map(|plane| {
                    let function = &function;
                    s.spawn(move || function(plane))
                })
                .collect();

            handles
                .into_iter()
                .map(|x| x.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        })
    };

    for (plane, result) in planes.iter_mut().zip(results) {
        *plane = result;
    }
    PixelBuffer::from_channels(&planes, width, height, colorspace)
}

/// Split `out` into bands of whole rows and fill each band with `function`
///
/// `function` receives the first row index of its band and the band itself.
/// Bands run on scoped threads when the `threads` feature is on.
pub(crate) fn for_each_row_band<T, F>(out: &mut [T], row_len: usize, function: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync
{
    if row_len == 0 || out.is_empty() {
        return;
    }
    let rows = out.len() / row_len;

    #[cfg(feature = "threads")]
    {
        let threads = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(1)
            .min(rows)
            .max(1);

        let band_rows = rows.div_ceil(threads);

        std::thread::scope(|s| {
            for (i, band) in out.chunks_mut(band_rows * row_len).enumerate() {
                let function = &function;
                s.spawn(move || function(i * band_rows, band));
            }
        });
    }
    #[cfg(not(feature = "threads"))]
    {
        let _ = rows;
        function(0, out);
    }
}

#[inline]
pub(crate) fn clamp_index(value: isize, len: usize) -> usize {
    value.clamp(0, len as isize - 1) as usize
}

#[inline]
pub(crate) fn round_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Fail unless `value` is odd and at least `min`
pub(crate) fn check_odd(name: &str, value: usize, min: usize) -> Result<(), ImageErrors> {
    if value % 2 == 0 || value < min {
        return Err(ImageErrors::InvalidParameter(format!(
            "{name} must be odd and at least {min}, found {value}"
        )));
    }
    Ok(())
}
