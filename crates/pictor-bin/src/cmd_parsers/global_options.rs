/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::Path;

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::{info, Level};
use pictor_image::codecs::{EncoderConfig, DEFAULT_JPEG_QUALITY};
use pictor_imageprocs::catalog::FilterOptions;

use crate::errors::CliErrors;
use crate::file_io::read_file;

#[derive(Debug, Copy, Clone)]
pub struct CmdOptions {
    pub encoder:        EncoderConfig,
    pub filter_options: FilterOptions,
    pub override_files: bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            encoder:        EncoderConfig::default(),
            filter_options: FilterOptions::default(),
            override_files: false
        }
    }
}

/// Parse a JSON filter configuration, missing fields keep their defaults
pub fn parse_filter_config(json: &[u8]) -> Result<FilterOptions, CliErrors> {
    Ok(serde_json::from_slice(json)?)
}

pub fn parse_options(options: &ArgMatches) -> Result<CmdOptions, CliErrors> {
    let mut cmd_options = CmdOptions::new();

    let quality = options
        .get_one::<u8>("quality")
        .copied()
        .unwrap_or(DEFAULT_JPEG_QUALITY);

    if options.value_source("quality") == Some(ValueSource::CommandLine) {
        info!("Setting JPEG quality to {quality}");
    }
    cmd_options.encoder.quality = quality;

    if let Some(config) = options.get_one::<String>("config") {
        info!("Reading filter configuration from {config:?}");

        let contents = read_file(Path::new(config))?;
        cmd_options.filter_options = parse_filter_config(&contents)?;
    }

    if options.get_flag("all-yes") {
        info!("Setting all commands to yes");
        cmd_options.override_files = true;
    }
    Ok(cmd_options)
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("warn") {
        Level::Warn
    } else if options.get_flag("info") {
        Level::Info
    } else {
        Level::Warn
    };

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}

#[cfg(test)]
mod tests {
    use pictor_imageprocs::catalog::{FilterOptions, SharpenMethod};

    use crate::cmd_args::create_cmd_args;
    use crate::cmd_parsers::global_options::{parse_filter_config, parse_options};
    use crate::errors::CliErrors;

    #[test]
    fn partial_config_keeps_defaults() {
        let json = br#"{ "sepia": { "vignette": false }, "hdr": { "saturation": 10 } }"#;
        let options = parse_filter_config(json).unwrap();

        assert!(!options.sepia.vignette);
        assert_eq!(options.hdr.saturation, 10);
        assert_eq!(options.hdr.tiles, (8, 8));
        assert_eq!(options.cartoon, FilterOptions::default().cartoon);
    }

    #[test]
    fn sharpen_method_from_config() {
        let json = br#"{ "sharpen": { "method": "LumaKernel" } }"#;
        let options = parse_filter_config(json).unwrap();
        assert_eq!(options.sharpen.method, SharpenMethod::LumaKernel);
    }

    #[test]
    fn broken_config_is_an_error() {
        assert!(matches!(
            parse_filter_config(b"{ not json"),
            Err(CliErrors::Config(_))
        ));
    }

    #[test]
    fn quality_from_command_line() {
        let matches = create_cmd_args()
            .try_get_matches_from(["pictor", "-i", "a.png", "-o", "b.jpg", "-f", "hdr", "--quality", "70"])
            .unwrap();
        let options = parse_options(&matches).unwrap();

        assert_eq!(options.encoder.quality, 70);
        assert!(!options.override_files);
    }
}
