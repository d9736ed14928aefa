/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Median blur
//!
//! Each pixel becomes the median of its `aperture x aperture` neighbourhood.
//!
//! A histogram of the window is kept per row and slid one column at a time,
//! so the cost per pixel grows with the aperture and not its square.
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::utils::{check_odd, clamp_index, map_planes};

/// Median filter a single plane, borders replicate the edge pixels
///
/// # Panics
/// If `aperture` is even
#[must_use]
pub fn median_plane(plane: &[u8], width: usize, height: usize, aperture: usize) -> Vec<u8> {
    assert_eq!(aperture % 2, 1, "Median aperture must be odd");

    let radius = (aperture / 2) as isize;
    // the median is the first value whose cumulative count passes half the window
    let half = (aperture * aperture) / 2;

    let mut out = vec![0; width * height];

    for (y, out_row) in out.chunks_exact_mut(width).enumerate() {
        let rows: Vec<&[u8]> = (-radius..=radius)
            .map(|dy| {
                let src_y = clamp_index(y as isize + dy, height);
                &plane[src_y * width..(src_y + 1) * width]
            })
            .collect();

        let mut histogram = [0_u32; 256];

        let add_column = |histogram: &mut [u32; 256], x: isize, sign: bool| {
            let x = clamp_index(x, width);
            for row in &rows {
                let bin = &mut histogram[usize::from(row[x])];
                if sign {
                    *bin += 1;
                } else {
                    *bin -= 1;
                }
            }
        };

        for x in -radius..=radius {
            add_column(&mut histogram, x, true);
        }

        for (x, out_px) in out_row.iter_mut().enumerate() {
            if x > 0 {
                let x = x as isize;
                add_column(&mut histogram, x - radius - 1, false);
                add_column(&mut histogram, x + radius, true);
            }
            let mut count = 0;
            for (value, bin) in histogram.iter().enumerate() {
                count += *bin as usize;
                if count > half {
                    *out_px = value as u8;
                    break;
                }
            }
        }
    }
    out
}

/// Median blur, alpha is left untouched
#[derive(Copy, Clone, Debug)]
pub struct MedianBlur {
    aperture: usize
}

impl MedianBlur {
    /// Create a median blur, `aperture` must be odd and at least 3
    #[must_use]
    pub fn new(aperture: usize) -> MedianBlur {
        MedianBlur { aperture }
    }
}

impl OperationsTrait for MedianBlur {
    fn name(&self) -> &'static str {
        "Median blur"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        check_odd("Median aperture", self.aperture, 3)?;

        let (width, height) = image.dimensions();

        map_planes(image, false, |plane| {
            median_plane(plane, width, height, self.aperture)
        })
    }
}

/// Median blur every color channel of an image
///
/// # Errors
/// `InvalidParameter` if `aperture` is even or less than 3
pub fn median_blur(image: &PixelBuffer, aperture: usize) -> Result<PixelBuffer, ImageErrors> {
    MedianBlur::new(aperture).execute(image)
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::errors::ImageErrors;
    use pictor_image::image::PixelBuffer;

    use crate::median::{median_blur, median_plane};

    fn naive_median(plane: &[u8], width: usize, height: usize, aperture: usize) -> Vec<u8> {
        let r = (aperture / 2) as isize;
        let mut out = vec![0; width * height];
        for y in 0..height {
            for x in 0..width {
                let mut window = vec![];
                for dy in -r..=r {
                    for dx in -r..=r {
                        let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
                        let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
                        window.push(plane[sy * width + sx]);
                    }
                }
                window.sort_unstable();
                out[y * width + x] = window[window.len() / 2];
            }
        }
        out
    }

    #[test]
    fn matches_sorting_median() {
        let (width, height) = (23, 19);
        let mut plane = vec![0; width * height];
        nanorand::WyRand::new_seed(9).fill(&mut plane);

        for aperture in [3, 5, 7] {
            assert_eq!(
                median_plane(&plane, width, height, aperture),
                naive_median(&plane, width, height, aperture)
            );
        }
    }

    #[test]
    fn removes_salt_noise() {
        let mut pixels = vec![100; 16 * 16];
        for i in [17, 50, 121, 200] {
            pixels[i] = 255;
        }
        let image = PixelBuffer::from_vec(pixels, 16, 16, ColorSpace::Luma).unwrap();
        let out = median_blur(&image, 3).unwrap();

        assert!(out.pixels().iter().all(|x| *x == 100));
    }

    #[test]
    fn rejects_bad_apertures() {
        let image = PixelBuffer::fill(0, ColorSpace::RGB, 4, 4).unwrap();
        for aperture in [0, 1, 4] {
            assert!(matches!(
                median_blur(&image, aperture),
                Err(ImageErrors::InvalidParameter(_))
            ));
        }
    }
}
