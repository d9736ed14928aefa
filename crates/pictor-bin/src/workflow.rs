/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsStr;
use std::io::{stdin, BufRead};
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{debug, info};
use pictor_image::codecs::{decode, encode_with_options, ImageFormat};
use pictor_image::errors::ImageErrors;
use pictor_image::image::PixelBuffer;
use pictor_imageprocs::catalog::Filter;

use crate::cmd_parsers::filters::selected_filters;
use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::CliErrors;
use crate::file_io::{output_path_for, read_file, write_file};
use crate::probe_files::probe_input_files;

pub(crate) fn create_and_exec_workflow_from_cmd(
    args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), CliErrors> {
    if args.get_flag("probe") {
        return probe_input_files(args);
    }
    info!("Creating workflows from input");

    let filters = selected_filters(args)?;
    let render_all = args.get_flag("all");

    let inputs = args
        .get_raw("in")
        .ok_or_else(|| CliErrors::Config("No input files".to_string()))?;
    let outputs = args
        .get_raw("out")
        .ok_or_else(|| CliErrors::Config("No output files".to_string()))?;

    if inputs.len() != outputs.len() {
        return Err(CliErrors::Config(format!(
            "Got {} input files but {} output files",
            inputs.len(),
            outputs.len()
        )));
    }

    for (in_file, out_file) in inputs.zip(outputs) {
        let out_path = Path::new(out_file);

        let format = output_format(out_path)?;

        let targets: Vec<(Filter, PathBuf)> = if render_all {
            filters
                .iter()
                .map(|f| (*f, output_path_for(out_path, *f)))
                .collect()
        } else {
            filters.iter().map(|f| (*f, out_path.to_path_buf())).collect()
        };

        for (_, target) in &targets {
            verify_file_paths(in_file, target.as_os_str(), cmd_opts)?;
        }

        let data = read_file(Path::new(in_file))?;
        let image = decode(&data)?;

        let (width, height) = image.dimensions();
        info!("Decoded {in_file:?}, {width}x{height} {}", image.colorspace());

        for (filter, target) in targets {
            let result = run_filter(&image, filter, cmd_opts)?;
            let encoded = encode_with_options(&result, format, cmd_opts.encoder)?;

            debug!("Writing {} bytes to {target:?}", encoded.len());
            write_file(&target, &encoded)?;

            info!("Wrote {filter} to {target:?}");
        }
    }

    Ok(())
}

fn run_filter(image: &PixelBuffer, filter: Filter, cmd_opts: &CmdOptions) -> Result<PixelBuffer, CliErrors> {
    let start = std::time::Instant::now();

    let result = filter.apply_with_options(image, &cmd_opts.filter_options)?;

    info!("{filter} took {} ms", start.elapsed().as_millis());
    Ok(result)
}

fn output_format(out_path: &Path) -> Result<ImageFormat, CliErrors> {
    let extension = out_path
        .extension()
        .map(|x| x.to_string_lossy().to_string())
        .unwrap_or_default();

    match ImageFormat::from_extension(&extension) {
        ImageFormat::Unknown => Err(ImageErrors::UnsupportedFormat(format!(
            "Cannot encode {out_path:?}, use a .png, .jpg or .jpeg extension"
        ))
        .into()),
        format => Ok(format)
    }
}

fn verify_file_paths(p0: &OsStr, p1: &OsStr, cmd_opts: &CmdOptions) -> Result<(), CliErrors> {
    if p0 == p1 {
        return Err(CliErrors::Config(format!(
            "Cannot use {p0:?} as both input and output"
        )));
    }
    let in_path = Path::new(p0);
    let out_path = Path::new(p1);

    if !in_path.exists() {
        return Err(CliErrors::Config(format!("Path {in_path:?}, does not exist")));
    }

    if !in_path.is_file() {
        return Err(CliErrors::Config(format!("Path {in_path:?} is not a file")));
    }

    if out_path.exists() {
        if cmd_opts.override_files {
            info!("Overwriting path {p1:?} ");
        } else {
            println!("File {out_path:?} exists, overwrite [y/N]");
            let mut result = String::new();

            stdin().lock().read_line(&mut result)?;

            if result.trim() != "y" {
                return Err(CliErrors::Config(format!(
                    "Not overwriting file {out_path:?}"
                )));
            }
        }
    }
    Ok(())
}
