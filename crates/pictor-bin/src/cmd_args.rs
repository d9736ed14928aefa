/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::{value_parser, Arg, ArgAction, Command};

static AFTER_HELP: &str = "Filters:
  watercolor, pencil, cartoon, sepia, hdr, sharpen

  Menu labels such as \"Watercolor Sketch\" or \"HDR Effect\" are accepted too,
  matching ignores case and treats '_' and '-' as spaces.";

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("pictor")
        .about("Apply stylistic filters to images")
        .after_help(AFTER_HELP)
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Input file to read data from")
            .action(ArgAction::Append)
            .required(true))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("Output to write the data to")
            .long_help("Output to write the data to.\nThe format is chosen from the extension, png, jpg or jpeg.\nWith --all every filter is written next to it as <stem>_<filter>.<ext>")
            .action(ArgAction::Append)
            .required_unless_present("probe"))
        .arg(Arg::new("filter")
            .short('f')
            .long("filter")
            .help("Name of the filter to apply")
            .help_heading("FILTERS")
            .conflicts_with("all")
            .required_unless_present_any(["all", "probe"]))
        .arg(Arg::new("all")
            .long("all")
            .action(ArgAction::SetTrue)
            .help_heading("FILTERS")
            .help("Apply every filter, writing one file per filter"))
        .arg(Arg::new("config")
            .long("config")
            .help_heading("FILTERS")
            .help("JSON file with filter tuning")
            .long_help("JSON file with filter tuning.\nFields that are left out keep their default values"))
        .arg(Arg::new("quality")
            .long("quality")
            .help_heading("ENCODING")
            .help("JPEG quality, 1-100")
            .value_parser(value_parser!(u8).range(1..=100))
            .default_value("95"))
        .arg(Arg::new("all-yes")
            .short('y')
            .long("yes")
            .action(ArgAction::SetTrue)
            .help_heading("ADVANCED")
            .help("Overwrite existing output files without asking"))
        .arg(Arg::new("probe")
            .long("probe")
            .action(ArgAction::SetTrue)
            .help("Print information about the input files as JSON and exit"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about each pipeline step"))
}
