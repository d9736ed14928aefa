/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use clap::ArgMatches;
use log::warn;
use pictor_image::codecs::ImageFormat;

use crate::errors::CliErrors;
use crate::file_io::read_file;
use crate::serde::Metadata;

/// Probe input files, extract metadata, and print to standard output.
pub fn probe_input_files(args: &ArgMatches) -> Result<(), CliErrors> {
    let Some(inputs) = args.get_raw("in") else {
        return Ok(());
    };
    for in_file in inputs {
        let path = Path::new(in_file);

        if !path.is_file() {
            warn!("Skipping {path:?}, not a file");
            continue;
        }
        let data = read_file(path)?;
        let format = ImageFormat::guess_format(&data);

        let image = format.decode(&data)?;
        let metadata = Metadata::new(in_file.to_os_string(), data.len() as u64, format, &image);

        println!("{}", serde_json::to_string_pretty(&metadata)?);
    }
    Ok(())
}
