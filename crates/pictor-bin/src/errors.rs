/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use pictor_image::errors::ImageErrors;

/// Everything that can stop the command line tool
pub enum CliErrors {
    Io(std::io::Error),
    Image(ImageErrors),
    /// Bad command line or configuration file
    Config(String)
}

impl Debug for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => writeln!(f, "IO error: {err}"),
            Self::Image(err) => writeln!(f, "{err:?}"),
            Self::Config(reason) => writeln!(f, "Configuration error: {reason}")
        }
    }
}

impl Display for CliErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for CliErrors {}

impl From<std::io::Error> for CliErrors {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ImageErrors> for CliErrors {
    fn from(value: ImageErrors) -> Self {
        Self::Image(value)
    }
}

impl From<serde_json::Error> for CliErrors {
    fn from(value: serde_json::Error) -> Self {
        Self::Config(value.to_string())
    }
}
