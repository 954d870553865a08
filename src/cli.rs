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
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version)]
#[command(about = "Filter, reformat, translate, split, and summarize FASTA files")]
pub struct Cli {
    // Input fasta file, `-` for stdin
    #[arg(required = true, help = "Input FASTA file (.gz supported, - for stdin)")]
    pub input_file: PathBuf,

    // Output file path, or base name of the directory in split mode
    #[arg(short = 'o', long = "output", required = false, help = "Output file, stdout if not given")]
    pub out_file: Option<PathBuf>,

    // Filters
    // // Exact name
    #[arg(long = "name", help = "Keep the record with this identifier")]
    pub name: Option<String>,
    // // Excluded name
    #[arg(long = "exclude", help = "Drop the record with this identifier")]
    pub exclude: Option<String>,
    // // Substring
    #[arg(long = "pattern", help = "Keep records whose identifier contains this")]
    pub pattern: Option<String>,
    // // Lists
    #[arg(long = "name-list", help = "Keep identifiers listed in this file")]
    pub name_list: Option<PathBuf>,
    #[arg(long = "exclude-list", help = "Drop identifiers listed in this file")]
    pub exclude_list: Option<PathBuf>,
    #[arg(long = "pattern-list", help = "Keep identifiers containing any substring listed in this file")]
    pub pattern_list: Option<PathBuf>,
    // // Length
    #[arg(long = "min-len", help = "Minimum sequence length (inclusive)")]
    pub min_len: Option<usize>,
    #[arg(long = "max-len", help = "Maximum sequence length (inclusive)")]
    pub max_len: Option<usize>,

    // Formatting
    #[arg(long = "suffix", help = "Append _SUFFIX to identifiers")]
    pub suffix: Option<String>,
    #[arg(long = "dealign", default_value_t = false, help = "Remove alignment gaps (-)")]
    pub dealign: bool,
    #[arg(long = "unwrap", default_value_t = false, help = "Write each sequence on a single line")]
    pub unwrap: bool,

    // Translation
    #[arg(long = "translate", default_value_t = false, help = "Translate to protein")]
    pub translate: bool,
    #[arg(long = "table", help = "NCBI codon table for --translate [default: 1]")]
    pub table: Option<u8>,

    // Splitting
    #[arg(long = "split-files", help = "Split output into this many files")]
    pub split_files: Option<usize>,
    #[arg(long = "split-records", help = "Split output into files of this many records")]
    pub split_records: Option<usize>,

    // Statistics
    #[arg(long = "stats", default_value_t = false, help = "Print sequence length statistics")]
    pub stats: bool,

    // Compress output
    #[arg(short = 'z', long = "gzip", default_value_t = false, help = "Gzip the output")]
    pub gzip: bool,

    // Verbosity
    #[arg(long = "verbose", default_value_t = false)]
    pub verbose: bool,
}

impl From<Cli> for fakit::config::Options {
    fn from(cli: Cli) -> Self {
        fakit::config::Options {
            input: cli.input_file,
            output: cli.out_file,
            gzip: cli.gzip,
            name: cli.name,
            exclude: cli.exclude,
            pattern: cli.pattern,
            name_list: cli.name_list,
            exclude_list: cli.exclude_list,
            pattern_list: cli.pattern_list,
            min_len: cli.min_len,
            max_len: cli.max_len,
            suffix: cli.suffix,
            dealign: cli.dealign,
            unwrap: cli.unwrap,
            translate: cli.translate,
            table: cli.table,
            split_files: cli.split_files,
            split_records: cli.split_records,
            stats: cli.stats,
        }
    }
}
