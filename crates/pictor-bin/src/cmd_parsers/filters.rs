/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::debug;
use pictor_imageprocs::catalog::Filter;

use crate::errors::CliErrors;

/// Filters requested on the command line, in the order they run
pub fn selected_filters(args: &ArgMatches) -> Result<Vec<Filter>, CliErrors> {
    if args.get_flag("all") {
        debug!("Selected every filter");
        return Ok(Filter::ALL.to_vec());
    }
    let name = args
        .get_one::<String>("filter")
        .ok_or_else(|| CliErrors::Config("No filter given, use --filter or --all".to_string()))?;

    let filter = name.parse::<Filter>()?;
    debug!("Selected filter {filter}");

    Ok(vec![filter])
}
