/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Separable gaussian blur
//!
//! The blur runs a 1D kernel over rows and then over columns,
//! replicating pixels at the borders.
//!
//! Either the kernel size or sigma may be left out (passed as zero) and it
//! is derived from the other one:
//!
//! - `ksize == 0`: `ksize = round(sigma * 6 + 1) | 1`
//! - `sigma <= 0`: `sigma = 0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`
//!
//! When blurring an image the kernel never grows past
//! `2 * max(width, height) + 1` taps, further taps only sample the
//! replicated border.
use log::trace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_image::traits::OperationsTrait;

use crate::utils::{clamp_index, map_planes, round_u8};

// binomial kernels used for small sizes when sigma is not given
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.031_25, 0.109_375, 0.218_75, 0.281_25, 0.218_75, 0.109_375, 0.031_25]
];

/// Resolve the kernel size and sigma
///
/// # Errors
/// `InvalidParameter` for an even size, or when both are zero
pub fn resolve_size_and_sigma(ksize: usize, sigma: f32) -> Result<(usize, f32), ImageErrors> {
    if ksize == 0 && sigma <= 0.0 {
        return Err(ImageErrors::InvalidParameter(
            "Gaussian blur needs a kernel size or a positive sigma".to_string()
        ));
    }
    if ksize != 0 && ksize % 2 == 0 {
        return Err(ImageErrors::InvalidParameter(format!(
            "Gaussian kernel size must be odd, found {ksize}"
        )));
    }
    if !sigma.is_finite() {
        return Err(ImageErrors::InvalidParameter(format!(
            "Gaussian sigma must be finite, found {sigma}"
        )));
    }
    let ksize = if ksize == 0 {
        ((sigma * 6.0 + 1.0).round() as usize) | 1
    } else {
        ksize
    };
    let sigma = if sigma <= 0.0 {
        0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
    } else {
        sigma
    };
    Ok((ksize, sigma))
}

/// Create a normalized 1D gaussian kernel of `ksize` taps
///
/// # Errors
/// See [`resolve_size_and_sigma`]
pub fn gaussian_kernel(ksize: usize, sigma: f32) -> Result<Vec<f32>, ImageErrors> {
    bounded_kernel(ksize, sigma, usize::MAX)
}

/// Create the kernel used to blur a `width` x `height` plane
///
/// Same as [`gaussian_kernel`] with the size capped to
/// `2 * max(width, height) + 1`
///
/// # Errors
/// See [`resolve_size_and_sigma`]
pub fn gaussian_kernel_for(
    ksize: usize, sigma: f32, width: usize, height: usize
) -> Result<Vec<f32>, ImageErrors> {
    bounded_kernel(ksize, sigma, 2 * width.max(height) + 1)
}

fn bounded_kernel(ksize: usize, sigma: f32, max_size: usize) -> Result<Vec<f32>, ImageErrors> {
    let use_table = ksize != 0 && ksize <= 7 && sigma <= 0.0;

    let (ksize, sigma) = resolve_size_and_sigma(ksize, sigma)?;

    if use_table {
        return Ok(SMALL_KERNELS[ksize / 2].to_vec());
    }
    if ksize > max_size {
        trace!("Capping gaussian kernel of {ksize} taps to {max_size}");
    }
    let ksize = ksize.min(max_size);
    let centre = (ksize as f32 - 1.0) * 0.5;
    let scale = -0.5 / (sigma * sigma);

    let mut kernel: Vec<f32> = (0..ksize)
        .map(|i| {
            let x = i as f32 - centre;
            (scale * x * x).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|x| *x /= sum);

    Ok(kernel)
}

/// Blur a float plane with a separable kernel
#[must_use]
pub fn separable_f32(plane: &[f32], width: usize, height: usize, kernel: &[f32]) -> Vec<f32> {
    let radius = (kernel.len() / 2) as isize;

    let mut rows = vec![0.0_f32; width * height];

    for (in_row, out_row) in plane.chunks_exact(width).zip(rows.chunks_exact_mut(width)) {
        for (x, out) in out_row.iter_mut().enumerate() {
            *out = kernel
                .iter()
                .enumerate()
                .map(|(k, w)| w * in_row[clamp_index(x as isize + k as isize - radius, width)])
                .sum();
        }
    }
    let mut out = vec![0.0_f32; width * height];

    for (y, out_row) in out.chunks_exact_mut(width).enumerate() {
        for (k, w) in kernel.iter().enumerate() {
            let src_y = clamp_index(y as isize + k as isize - radius, height);
            let src_row = &rows[src_y * width..(src_y + 1) * width];

            for (o, s) in out_row.iter_mut().zip(src_row) {
                *o += w * s;
            }
        }
    }
    out
}

/// Blur a float plane
///
/// # Errors
/// See [`resolve_size_and_sigma`]
pub fn gaussian_blur_f32(
    plane: &[f32], width: usize, height: usize, ksize: usize, sigma: f32
) -> Result<Vec<f32>, ImageErrors> {
    let kernel = gaussian_kernel_for(ksize, sigma, width, height)?;
    Ok(separable_f32(plane, width, height, &kernel))
}

/// Blur an 8-bit plane
///
/// # Errors
/// See [`resolve_size_and_sigma`]
pub fn gaussian_blur_u8(
    plane: &[u8], width: usize, height: usize, ksize: usize, sigma: f32
) -> Result<Vec<u8>, ImageErrors> {
    let kernel = gaussian_kernel_for(ksize, sigma, width, height)?;
    let float: Vec<f32> = plane.iter().map(|x| f32::from(*x)).collect();

    Ok(separable_f32(&float, width, height, &kernel)
        .into_iter()
        .map(round_u8)
        .collect())
}

/// Perform a gaussian blur
///
/// Alpha is left untouched
#[derive(Copy, Clone, Debug)]
pub struct GaussianBlur {
    ksize: usize,
    sigma: f32
}

impl GaussianBlur {
    /// Create a new gaussian blur
    ///
    /// Pass `ksize = 0` to derive the size from sigma,
    /// or `sigma = 0` to derive sigma from the size
    #[must_use]
    pub fn new(ksize: usize, sigma: f32) -> GaussianBlur {
        GaussianBlur { ksize, sigma }
    }
}

impl OperationsTrait for GaussianBlur {
    fn name(&self) -> &'static str {
        "Gaussian blur"
    }

    fn execute_impl(&self, image: &PixelBuffer) -> Result<PixelBuffer, ImageErrors> {
        let (width, height) = image.dimensions();
        let kernel = gaussian_kernel_for(self.ksize, self.sigma, width, height)?;

        trace!("Gaussian kernel has {} taps", kernel.len());

        map_planes(image, false, |plane| {
            let float: Vec<f32> = plane.iter().map(|x| f32::from(*x)).collect();

            separable_f32(&float, width, height, &kernel)
                .into_iter()
                .map(round_u8)
                .collect()
        })
    }
}

/// Blur every color channel of an image
///
/// # Errors
/// See [`resolve_size_and_sigma`]
pub fn gaussian_blur(
    image: &PixelBuffer, ksize: usize, sigma: f32
) -> Result<PixelBuffer, ImageErrors> {
    GaussianBlur::new(ksize, sigma).execute(image)
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::errors::ImageErrors;
    use pictor_image::image::PixelBuffer;

    use crate::gaussian_blur::{
        gaussian_blur, gaussian_kernel, gaussian_kernel_for, resolve_size_and_sigma
    };

    #[test]
    fn sizes_and_sigmas_are_derived() {
        assert_eq!(resolve_size_and_sigma(0, 3.0).unwrap().0, 19);
        let (size, sigma) = resolve_size_and_sigma(21, 0.0).unwrap();
        assert_eq!(size, 21);
        assert!((sigma - 3.5).abs() < 1e-5);
    }

    #[test]
    fn bad_parameters() {
        assert!(matches!(
            resolve_size_and_sigma(4, 1.0),
            Err(ImageErrors::InvalidParameter(_))
        ));
        assert!(matches!(
            resolve_size_and_sigma(0, 0.0),
            Err(ImageErrors::InvalidParameter(_))
        ));
    }

    #[test]
    fn huge_sigma_kernel_is_capped_to_the_image() {
        let kernel = gaussian_kernel_for(0, 1e10, 5, 3).unwrap();
        assert_eq!(kernel.len(), 11);
        assert_eq!(gaussian_kernel_for(41, 0.0, 4, 4).unwrap().len(), 9);

        let image = PixelBuffer::fill(77, ColorSpace::RGB, 6, 4).unwrap();
        assert_eq!(gaussian_blur(&image, 0, 1e10).unwrap(), image);
    }

    #[test]
    fn kernels_sum_to_one() {
        for (size, sigma) in [(3, 0.0), (7, 0.0), (21, 0.0), (0, 3.0), (9, 2.5)] {
            let kernel = gaussian_kernel(size, sigma).unwrap();
            let sum: f32 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-4, "{size} {sigma} {sum}");
        }
    }

    #[test]
    fn blur_keeps_flat_images_and_dimensions() {
        let flat = PixelBuffer::fill(200, ColorSpace::RGB, 33, 20).unwrap();
        assert_eq!(gaussian_blur(&flat, 21, 0.0).unwrap(), flat);

        let mut pixels = vec![0; 33 * 20];
        nanorand::WyRand::new_seed(1).fill(&mut pixels);
        let noisy = PixelBuffer::from_vec(pixels, 33, 20, ColorSpace::Luma).unwrap();

        let blurred = gaussian_blur(&noisy, 0, 3.0).unwrap();
        assert_eq!(blurred.dimensions(), (33, 20));
    }
}
