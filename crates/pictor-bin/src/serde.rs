/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use pictor_image::codecs::ImageFormat;
use pictor_image::image::PixelBuffer;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// What `--probe` prints for one file
pub struct Metadata<'a> {
    file:   OsString,
    size:   u64,
    format: ImageFormat,
    image:  &'a PixelBuffer
}

impl<'a> Metadata<'a> {
    pub fn new(file: OsString, size: u64, format: ImageFormat, image: &'a PixelBuffer) -> Metadata<'a> {
        Metadata {
            file,
            size,
            format,
            image
        }
    }
}

impl<'a> Serialize for Metadata<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let mut state = serializer.serialize_struct("ImageMetadata", 7)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("format", &self.format)?;
        state.serialize_field("width", &self.image.width())?;
        state.serialize_field("height", &self.image.height())?;
        state.serialize_field("colorspace", &self.image.colorspace())?;
        state.serialize_field("channels", &self.image.channels())?;

        state.end()
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use pictor_image::codecs::ImageFormat;
    use pictor_image::colorspace::ColorSpace;
    use pictor_image::image::PixelBuffer;

    use crate::serde::Metadata;

    #[test]
    fn probe_json_fields() {
        let image = PixelBuffer::fill(0, ColorSpace::RGBA, 3, 2).unwrap();
        let metadata = Metadata::new(OsString::from("a.png"), 120, ImageFormat::PNG, &image);

        let value = serde_json::to_value(&metadata).unwrap();

        assert_eq!(value["file"], "a.png");
        assert_eq!(value["format"], "PNG");
        assert_eq!(value["width"], 3);
        assert_eq!(value["height"], 2);
        assert_eq!(value["colorspace"], "RGBA");
        assert_eq!(value["channels"], 4);
    }
}
