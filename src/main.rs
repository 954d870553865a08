// fakit: Filter, reformat, translate, split, and summarize FASTA files.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use clap::Parser;

use log::error;

mod cli;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) {
    let res = stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init();

    if let Err(e) = res {
        eprintln!("could not initialize logging: {}", e);
    }
}

fn main() {
    let cli = cli::Cli::parse();

    init_log(if cli.verbose { 2 } else { 1 });

    let options: fakit::config::Options = cli.into();
    if let Err(e) = fakit::run(&options) {
        error!("{}", e);
        std::process::exit(1);
    }
}
