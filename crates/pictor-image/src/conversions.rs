/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Colorspace conversions
//!
//! Every conversion goes through RGB, so a `LAB -> HSV` request becomes
//! `LAB -> RGB -> HSV`. Conversions between the three channel spaces
//! work per pixel and round to the nearest integer, so a round trip may be
//! off by a small amount.
use crate::colorspace::ColorSpace;
use crate::errors::ImageErrors;
use crate::image::PixelBuffer;

#[inline]
fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// BT.601 luma of an RGB triple
#[inline]
#[must_use]
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    clamp_u8(0.299 * f32::from(r) + 0.587 * f32::from(g) + 0.114 * f32::from(b))
}

#[must_use]
pub fn rgb_to_ycrcb(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, bf) = (f32::from(r), f32::from(b));
    let y = 0.299 * rf + 0.587 * f32::from(g) + 0.114 * bf;

    let cr = (rf - y) * 0.713 + 128.0;
    let cb = (bf - y) * 0.564 + 128.0;

    [clamp_u8(y), clamp_u8(cr), clamp_u8(cb)]
}

#[must_use]
pub fn ycrcb_to_rgb(y: u8, cr: u8, cb: u8) -> [u8; 3] {
    let y = f32::from(y);
    let cr = f32::from(cr) - 128.0;
    let cb = f32::from(cb) - 128.0;

    let r = y + 1.403 * cr;
    let g = y - 0.714 * cr - 0.344 * cb;
    let b = y + 1.773 * cb;

    [clamp_u8(r), clamp_u8(g), clamp_u8(b)]
}

/// RGB to 8-bit HSV, hue is halved to fit `[0,180)`
#[must_use]
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (f32::from(r), f32::from(g), f32::from(b));

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let diff = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { 255.0 * diff / max };

    let mut h = if diff == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (gf - bf) / diff
    } else if max == gf {
        120.0 + 60.0 * (bf - rf) / diff
    } else {
        240.0 + 60.0 * (rf - gf) / diff
    };
    if h < 0.0 {
        h += 360.0;
    }
    let h = (h / 2.0).round() as u32 % 180;

    [h as u8, clamp_u8(s), clamp_u8(v)]
}

#[must_use]
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> [u8; 3] {
    let h = (f32::from(h) * 2.0) % 360.0;
    let s = f32::from(s) / 255.0;
    let v = f32::from(v);

    if s == 0.0 {
        let v = clamp_u8(v);
        return [v, v, v];
    }
    let sector = h / 60.0;
    let i = sector.floor();
    let f = sector - i;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q)
    };
    [clamp_u8(r), clamp_u8(g), clamp_u8(b)]
}

// D65 white point
const XN: f32 = 0.950_456;
const ZN: f32 = 1.088_754;

#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > 0.008_856 {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

#[inline]
fn lab_f_inv(t: f32) -> f32 {
    let cube = t * t * t;
    if cube > 0.008_856 {
        cube
    } else {
        (t - 16.0 / 116.0) / 7.787
    }
}

/// RGB to 8-bit CIE L*a*b* under D65
#[must_use]
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> [u8; 3] {
    let r = srgb_to_linear(f32::from(r) / 255.0);
    let g = srgb_to_linear(f32::from(g) / 255.0);
    let b = srgb_to_linear(f32::from(b) / 255.0);

    let x = (0.412_453 * r + 0.357_580 * g + 0.180_423 * b) / XN;
    let y = 0.212_671 * r + 0.715_160 * g + 0.072_169 * b;
    let z = (0.019_334 * r + 0.119_193 * g + 0.950_227 * b) / ZN;

    let l = if y > 0.008_856 {
        116.0 * y.cbrt() - 16.0
    } else {
        903.3 * y
    };
    let (fx, fy, fz) = (lab_f(x), lab_f(y), lab_f(z));

    let a = 500.0 * (fx - fy) + 128.0;
    let bb = 200.0 * (fy - fz) + 128.0;

    [clamp_u8(l * 255.0 / 100.0), clamp_u8(a), clamp_u8(bb)]
}

#[must_use]
pub fn lab_to_rgb(l: u8, a: u8, b: u8) -> [u8; 3] {
    let l = f32::from(l) * 100.0 / 255.0;
    let a = f32::from(a) - 128.0;
    let b = f32::from(b) - 128.0;

    let fy = (l + 16.0) / 116.0;
    let fx = fy + a / 500.0;
    let fz = fy - b / 200.0;

    let y = if l > 903.3 * 0.008_856 {
        fy * fy * fy
    } else {
        l / 903.3
    };
    let x = lab_f_inv(fx) * XN;
    let z = lab_f_inv(fz) * ZN;

    let r = 3.240_479 * x - 1.537_15 * y - 0.498_535 * z;
    let g = -0.969_256 * x + 1.875_991 * y + 0.041_556 * z;
    let bl = 0.055_648 * x - 0.204_043 * y + 1.057_311 * z;

    [
        clamp_u8(linear_to_srgb(r.clamp(0.0, 1.0)) * 255.0),
        clamp_u8(linear_to_srgb(g.clamp(0.0, 1.0)) * 255.0),
        clamp_u8(linear_to_srgb(bl.clamp(0.0, 1.0)) * 255.0)
    ]
}

fn map_pixels<const IN: usize, const OUT: usize>(
    pixels: &[u8], func: impl Fn(&[u8]) -> [u8; OUT]
) -> Vec<u8> {
    let mut out = vec![0; pixels.len() / IN * OUT];

    for (src, dst) in pixels.chunks_exact(IN).zip(out.chunks_exact_mut(OUT)) {
        dst.copy_from_slice(&func(src));
    }
    out
}

fn to_rgb_samples(pixels: &[u8], from: ColorSpace) -> Vec<u8> {
    match from {
        ColorSpace::RGB => pixels.to_vec(),
        ColorSpace::Luma => map_pixels::<1, 3>(pixels, |p| [p[0]; 3]),
        ColorSpace::RGBA => map_pixels::<4, 3>(pixels, |p| [p[0], p[1], p[2]]),
        ColorSpace::LAB => map_pixels::<3, 3>(pixels, |p| lab_to_rgb(p[0], p[1], p[2])),
        ColorSpace::HSV => map_pixels::<3, 3>(pixels, |p| hsv_to_rgb(p[0], p[1], p[2])),
        ColorSpace::YCrCb => map_pixels::<3, 3>(pixels, |p| ycrcb_to_rgb(p[0], p[1], p[2]))
    }
}

fn from_rgb_samples(rgb: Vec<u8>, to: ColorSpace) -> Vec<u8> {
    match to {
        ColorSpace::RGB => rgb,
        ColorSpace::Luma => map_pixels::<3, 1>(&rgb, |p| [rgb_to_luma(p[0], p[1], p[2])]),
        ColorSpace::RGBA => map_pixels::<3, 4>(&rgb, |p| [p[0], p[1], p[2], 255]),
        ColorSpace::LAB => map_pixels::<3, 3>(&rgb, |p| rgb_to_lab(p[0], p[1], p[2])),
        ColorSpace::HSV => map_pixels::<3, 3>(&rgb, |p| rgb_to_hsv(p[0], p[1], p[2])),
        ColorSpace::YCrCb => map_pixels::<3, 3>(&rgb, |p| rgb_to_ycrcb(p[0], p[1], p[2]))
    }
}

/// Convert `image` whose samples are laid out as `from` into `to`
///
/// `from` is usually `image.colorspace()`, passing a different value
/// reinterprets the samples, which is how a three channel buffer can be
/// read as e.g. HSV.
///
/// # Errors
/// `InvalidChannelCount` if the image does not have `from.num_components()`
/// channels
pub fn convert(
    image: &PixelBuffer, from: ColorSpace, to: ColorSpace
) -> Result<PixelBuffer, ImageErrors> {
    if image.channels() != from.num_components() {
        return Err(ImageErrors::InvalidChannelCount(
            from.num_components(),
            image.channels()
        ));
    }
    let (width, height) = image.dimensions();

    if from == to {
        return PixelBuffer::from_u8(image.pixels(), width, height, to);
    }
    log::trace!("Converting {width}x{height} image from {from:?} to {to:?}");

    let out = from_rgb_samples(to_rgb_samples(image.pixels(), from), to);

    PixelBuffer::from_vec(out, width, height, to)
}

#[cfg(test)]
mod tests {
    use nanorand::Rng;

    use crate::colorspace::ColorSpace;
    use crate::conversions::*;
    use crate::errors::ImageErrors;
    use crate::image::PixelBuffer;

    #[test]
    fn luma_of_primaries() {
        assert_eq!(rgb_to_luma(255, 255, 255), 255);
        assert_eq!(rgb_to_luma(0, 0, 0), 0);
        assert_eq!(rgb_to_luma(255, 0, 0), 76);
        assert_eq!(rgb_to_luma(0, 255, 0), 150);
        assert_eq!(rgb_to_luma(0, 0, 255), 29);
    }

    #[test]
    fn hsv_of_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
        assert_eq!(rgb_to_hsv(128, 128, 128), [0, 0, 128]);
    }

    #[test]
    fn lab_of_extremes() {
        assert_eq!(rgb_to_lab(0, 0, 0), [0, 128, 128]);

        let white = rgb_to_lab(255, 255, 255);
        assert_eq!(white[0], 255);
        assert!(white[1].abs_diff(128) <= 1);
        assert!(white[2].abs_diff(128) <= 1);
    }

    #[test]
    fn three_channel_round_trips_stay_close() {
        let mut rand = nanorand::WyRand::new_seed(42);
        let mut sample = [0_u8; 3];

        for _ in 0..2000 {
            rand.fill(&mut sample);
            let [r, g, b] = sample;

            let [y, cr, cb] = rgb_to_ycrcb(r, g, b);
            let back = ycrcb_to_rgb(y, cr, cb);
            for (a, b) in back.iter().zip(&sample) {
                assert!(a.abs_diff(*b) <= 3, "ycrcb {sample:?} -> {back:?}");
            }

            let [l, a, bb] = rgb_to_lab(r, g, b);
            let back = lab_to_rgb(l, a, bb);
            for (a, b) in back.iter().zip(&sample) {
                assert!(a.abs_diff(*b) <= 8, "lab {sample:?} -> {back:?}");
            }

            let [h, s, v] = rgb_to_hsv(r, g, b);
            let back = hsv_to_rgb(h, s, v);
            for (a, b) in back.iter().zip(&sample) {
                assert!(a.abs_diff(*b) <= 8, "hsv {sample:?} -> {back:?}");
            }
        }
    }

    #[test]
    fn gray_to_rgb_replicates() {
        let image = PixelBuffer::from_u8(&[10, 20], 2, 1, ColorSpace::Luma).unwrap();
        let rgb = image.to_rgb().unwrap();

        assert_eq!(rgb.pixels(), &[10, 10, 10, 20, 20, 20]);
    }

    #[test]
    fn rgba_drops_and_restores_alpha() {
        let image = PixelBuffer::from_u8(&[1, 2, 3, 4], 1, 1, ColorSpace::RGBA).unwrap();
        let rgb = image.to_rgb().unwrap();
        assert_eq!(rgb.pixels(), &[1, 2, 3]);

        let rgba = rgb.convert_color(ColorSpace::RGBA).unwrap();
        assert_eq!(rgba.pixels(), &[1, 2, 3, 255]);
    }

    #[test]
    fn wrong_source_layout_is_rejected() {
        let image = PixelBuffer::fill(0, ColorSpace::Luma, 2, 2).unwrap();
        let err = convert(&image, ColorSpace::RGB, ColorSpace::HSV).unwrap_err();

        assert!(matches!(err, ImageErrors::InvalidChannelCount(3, 1)));
    }
}
