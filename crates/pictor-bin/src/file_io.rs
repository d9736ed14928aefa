/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use pictor_imageprocs::catalog::Filter;

use crate::errors::CliErrors;

/// Read a whole file into memory
pub fn read_file(path: &Path) -> Result<Vec<u8>, CliErrors> {
    let mut fd = BufReader::new(File::open(path)?);
    let mut buf = Vec::with_capacity(1 << 20);

    fd.read_to_end(&mut buf)?;

    Ok(buf)
}

/// Create or truncate `path` and write `data` to it
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), CliErrors> {
    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(path)?;

    let mut buf_writer = BufWriter::new(file);
    buf_writer.write_all(data)?;
    buf_writer.flush()?;

    Ok(())
}

/// Output path of one filter when every filter is rendered
///
/// `out/photo.png` becomes `out/photo_pencil_sketch.png`
pub fn output_path_for(out: &Path, filter: Filter) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|x| x.to_string_lossy().to_string())
        .unwrap_or_default();

    let mut name = format!("{stem}_{}", filter.slug());

    if let Some(ext) = out.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    out.with_file_name(name)
}
