/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::read;

use pictor_image::colorspace::ColorSpace;
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_imageprocs::catalog::{
    apply_all, apply_filter, apply_filter_with_options, cartoon_edge_mask, CartoonOptions, Filter,
    FilterOptions, SharpenMethod
};

use crate::{checkerboard, gradient, hash, json_path, random_image, NameEntry};

#[test]
fn every_filter_keeps_dimensions() {
    let inputs = [
        random_image(1, 1, ColorSpace::RGB, 1),
        random_image(2, 2, ColorSpace::RGB, 2),
        random_image(17, 9, ColorSpace::Luma, 3),
        random_image(9, 17, ColorSpace::RGBA, 4),
        gradient(40, 30).convert_color(ColorSpace::LAB).unwrap()
    ];
    for image in &inputs {
        for (filter, out) in apply_all(image, &FilterOptions::default()).unwrap() {
            assert_eq!(out.dimensions(), image.dimensions(), "{filter}");
            assert_eq!(out.channels(), 3, "{filter}");
            assert_eq!(out.colorspace(), ColorSpace::RGB, "{filter}");
        }
    }
}

#[test]
fn filters_are_deterministic() {
    let image = random_image(48, 32, ColorSpace::RGB, 77);

    for filter in Filter::ALL {
        let first = hash(filter.apply(&image).unwrap().pixels());
        let second = hash(filter.apply(&image).unwrap().pixels());

        assert_eq!(first, second, "{filter} is not deterministic");
    }
}

#[test]
fn names_resolve() {
    let json_file = read(json_path("filter_names.json")).unwrap();
    let entries: Vec<NameEntry> = serde_json::from_slice(&json_file).unwrap();

    for entry in &entries {
        let parsed = entry.name.parse::<Filter>();

        match &entry.filter {
            Some(slug) => {
                let filter = parsed.unwrap_or_else(|e| panic!("{entry:?}: {e}"));
                assert_eq!(filter.slug(), slug, "{entry:?}");
            }
            None => assert!(
                matches!(parsed, Err(ImageErrors::UnknownFilter(_))),
                "{entry:?} should be rejected"
            )
        }
    }
}

#[test]
fn unknown_filter_leaves_no_output() {
    let image = gradient(10, 10);
    let copy = image.clone();

    let result = apply_filter(&image, "Oil Painting");

    assert!(matches!(result, Err(ImageErrors::UnknownFilter(name)) if name == "Oil Painting"));
    assert_eq!(image, copy);
}

#[test]
fn sepia_of_white_pixel_clamps() {
    let white = PixelBuffer::from_u8(&[255, 255, 255], 1, 1, ColorSpace::RGB).unwrap();
    let out = apply_filter(&white, "Sepia Effect").unwrap();

    assert_eq!(out.pixels(), &[255, 255, 255]);
}

#[test]
fn checkerboard_mask_is_non_trivial() {
    for (size, cell) in [(2, 1), (64, 8)] {
        let board = checkerboard(size, size, cell);
        let mask = cartoon_edge_mask(&board, &CartoonOptions::default()).unwrap();

        assert_eq!(mask.colorspace(), ColorSpace::Luma);
        assert!(mask.pixels().contains(&0), "{size}x{size}");
        assert!(mask.pixels().contains(&255), "{size}x{size}");

        let cartoon = apply_filter(&board, "cartoon").unwrap();
        assert_eq!(cartoon.dimensions(), (size, size));
    }
}

#[test]
fn options_survive_json() {
    let mut options = FilterOptions::default();
    options.sharpen.method = SharpenMethod::LumaKernel;
    options.hdr.tiles = (4, 2);
    options.pencil_sketch.blur_size = 11;

    let json = serde_json::to_string(&options).unwrap();
    let back: FilterOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, options);

    let empty: FilterOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, FilterOptions::default());
}

#[test]
fn options_change_the_output() {
    let image = gradient(32, 32);

    let mut options = FilterOptions::default();
    options.sepia.vignette = false;

    let plain = apply_filter_with_options(&image, "sepia", &options).unwrap();
    let vignetted = apply_filter(&image, "sepia").unwrap();

    // without the vignette every pixel is at least as bright
    for (a, b) in plain.pixels().iter().zip(vignetted.pixels()) {
        assert!(a >= b);
    }
    assert_ne!(plain, vignetted);
}
