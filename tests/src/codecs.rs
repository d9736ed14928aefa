/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use pictor_image::codecs::{decode, encode, encode_with_options, EncoderConfig, ImageFormat};
use pictor_image::colorspace::ColorSpace;
use pictor_image::errors::ImageErrors;

use crate::{gradient, hash, random_image};

#[test]
fn png_round_trip_is_exact() {
    for colorspace in [ColorSpace::Luma, ColorSpace::RGB, ColorSpace::RGBA] {
        let image = random_image(33, 17, colorspace, 4);

        let bytes = encode(&image, ImageFormat::PNG).unwrap();
        assert_eq!(ImageFormat::guess_format(&bytes), ImageFormat::PNG);

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.colorspace(), colorspace);
        assert_eq!(hash(decoded.pixels()), hash(image.pixels()));

        // and once more through the encoder
        let again = decode(&encode(&decoded, ImageFormat::PNG).unwrap()).unwrap();
        assert_eq!(again, image);
    }
}

#[test]
fn jpeg_round_trip_is_bounded() {
    let image = gradient(64, 48);

    let bytes = encode_with_options(&image, ImageFormat::JPEG, EncoderConfig { quality: 100 }).unwrap();
    assert_eq!(ImageFormat::guess_format(&bytes), ImageFormat::JPEG);

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.dimensions(), (64, 48));
    assert_eq!(decoded.colorspace(), ColorSpace::RGB);

    let max_delta = decoded
        .pixels()
        .iter()
        .zip(image.pixels())
        .map(|(a, b)| a.abs_diff(*b))
        .max()
        .unwrap();
    assert!(max_delta <= 10, "max delta {max_delta}");
}

#[test]
fn non_storage_colorspaces_are_encoded_as_rgb() {
    let hsv = gradient(8, 8).convert_color(ColorSpace::HSV).unwrap();
    let decoded = decode(&encode(&hsv, ImageFormat::PNG).unwrap()).unwrap();

    assert_eq!(decoded.colorspace(), ColorSpace::RGB);
    assert_eq!(decoded, hsv.to_rgb().unwrap());
}

#[test]
fn unknown_and_corrupt_inputs() {
    assert!(matches!(
        decode(b"GIF89a\x01\x00\x01\x00"),
        Err(ImageErrors::UnsupportedFormat(_))
    ));
    assert!(matches!(decode(&[]), Err(ImageErrors::UnsupportedFormat(_))));

    let png = encode(&gradient(16, 16), ImageFormat::PNG).unwrap();
    assert!(matches!(
        decode(&png[..20]),
        Err(ImageErrors::CorruptData(_))
    ));

    assert!(matches!(
        encode(&gradient(4, 4), ImageFormat::Unknown),
        Err(ImageErrors::UnsupportedFormat(_))
    ));
}
