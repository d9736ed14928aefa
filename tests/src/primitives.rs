/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;
use pictor_image::colorspace::ColorSpace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_imageprocs::blend::linear_blend;
use pictor_imageprocs::convolve::{convolve_f32, Kernel};
use pictor_imageprocs::gaussian_blur::gaussian_blur_f32;
use pictor_imageprocs::threshold::adaptive_threshold;

use crate::random_image;

fn random_plane(len: usize, seed: u64) -> Vec<f32> {
    let mut bytes = vec![0_u8; len];
    nanorand::WyRand::new_seed(seed).fill(&mut bytes);
    bytes.into_iter().map(f32::from).collect()
}

fn assert_scaled(a: &[f32], b: &[f32], scale: f32) {
    for (x, y) in a.iter().zip(b) {
        assert!((x * scale - y).abs() <= 1e-2 * (1.0 + y.abs()), "{x} * {scale} != {y}");
    }
}

#[test]
fn convolution_is_linear() {
    let (w, h) = (23, 19);
    let plane = random_plane(w * h, 99);
    let kernel = Kernel::new(5, (0..25).map(|x| (x as f32 - 12.0) / 7.0).collect()).unwrap();

    for scale in [0.5, 2.0, -3.0] {
        let scaled: Vec<f32> = plane.iter().map(|x| x * scale).collect();

        assert_scaled(
            &convolve_f32(&plane, w, h, &kernel),
            &convolve_f32(&scaled, w, h, &kernel),
            scale
        );
        assert_scaled(
            &gaussian_blur_f32(&plane, w, h, 7, 1.5).unwrap(),
            &gaussian_blur_f32(&scaled, w, h, 7, 1.5).unwrap(),
            scale
        );
    }
}

#[test]
fn adaptive_threshold_is_binary() {
    for seed in 0..4 {
        let gray = random_image(31, 27, ColorSpace::Luma, seed);
        let out = adaptive_threshold(&gray, 9, 9.0).unwrap();

        assert!(out.pixels().iter().all(|x| *x == 0 || *x == 255));
    }
}

#[test]
fn identity_blend() {
    let image = random_image(20, 20, ColorSpace::RGBA, 6);
    let out = linear_blend(&image, &image, 0.5, 0.5, 0.0).unwrap();

    for (a, b) in out.pixels().iter().zip(image.pixels()) {
        assert!(a.abs_diff(*b) <= 1);
    }
}

#[test]
fn blend_rejects_mismatched_sizes() {
    let a = random_image(4, 4, ColorSpace::RGB, 1);
    let b = random_image(5, 4, ColorSpace::RGB, 1);

    assert!(matches!(
        linear_blend(&a, &b, 0.5, 0.5, 0.0),
        Err(ImageErrors::DimensionMismatch((4, 4), (5, 4)))
    ));
}
