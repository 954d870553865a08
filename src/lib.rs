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

//! fakit is a library and a command-line client for:
//!
//!   - Selecting FASTA records by name, name lists, substrings, and length.
//!   - Reformatting records: adding an identifier suffix, unwrapping
//!     multi-line sequences, and removing alignment gaps.
//!   - Translating coding sequences to protein with the NCBI genetic codes.
//!   - Splitting a FASTA file into several files.
//!   - Computing sequence length statistics.
//!
//! Input and output can be plain text or gzip-compressed.
//!
//! ## Usage
//!
//! ### Command line
//!
//! The fakit CLI runs in one of four modes:
//!   - filter (default): keep the records that pass all given filters,
//!     reformat them, and write them to a single output.
//!   - split: as filter, but write the output into numbered files with
//!     `--split-files` or `--split-records`.
//!   - `--stats`: print the longest, shortest, and mean sequence length and
//!     the number of sequences and bases.
//!   - `--translate`: translate every record whose length is a multiple
//!     of 3.
//!
//! Statistics and translation cannot be combined with any other option.
//! Conflicting options are rejected before the input is opened.
//!
//! ### Rust API
//!
//! The API provides several functions for operating on structs that implement
//! [Read] and/or [Write]. These are meant for use cases where an entire stream
//! should be processed.
//!
//! For use cases requiring access to a single record at a time, the following
//! are provided:
//!
//!   - [Parser](parser::Parser): takes a [Read] containing FASTA and returns [Record]s.
//!   - [FilterCriteria](filter::FilterCriteria): decides whether to keep a [Record].
//!   - [FormatOptions](printer::FormatOptions): rewrites a [Record] before printing.
//!   - [write_record](printer::write_record): writes a [Record] as FASTA.
//!   - [CodonTable](translate::CodonTable): translates a [Record] to protein.
//!   - [LengthStats](stats::LengthStats): accumulates sequence length statistics.
//!
//! See documentation for the appropriate functions or structs for usage examples.
//!

use crate::config::Mode;
use crate::config::Options;
use crate::filter::FilterCriteria;
use crate::io::Sink;
use crate::parser::Parser;
use crate::printer::FormatOptions;
use crate::stats::LengthStats;
use crate::stats::Summary;
use crate::translate::CodonTable;
use crate::translate::LengthNotMultipleOfThree;

use std::io::Read;
use std::io::Write;

use log::info;
use log::warn;

pub mod config;
pub mod filter;
pub mod io;
pub mod parser;
pub mod printer;
pub mod split;
pub mod stats;
pub mod translate;

type E = Box<dyn std::error::Error>;

/// A FASTA record.
///
/// `seq` may contain line breaks if it was read from a multi-line record.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Record {
    /// Identifier line without the leading `>`.
    pub id: String,
    pub seq: String,
}

impl Record {
    pub fn new(
        id: &str,
        seq: &str,
    ) -> Self {
        Record{ id: id.to_string(), seq: seq.to_string() }
    }

    /// Number of residues, not counting line breaks.
    pub fn len(&self) -> usize {
        self.seq.bytes().filter(|x| *x != b'\n').count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Filter and reformat records from [Read] and write them to [Write].
///
/// Records are written in input order as soon as they are read.
///
/// Returns the number of records written.
///
/// ## Usage
///
/// ```rust
/// use fakit::filter_from_read_to_write;
/// use fakit::filter::FilterCriteria;
/// use fakit::printer::FormatOptions;
/// use std::io::Cursor;
///
/// let mut input_bytes: Vec<u8> = Vec::new();
/// input_bytes.append(&mut b">chr1\nACGT-ACGT\nAC\n".to_vec());
/// input_bytes.append(&mut b">plasmid1\nGG\n".to_vec());
/// input_bytes.append(&mut b">chr2\nTTTT\n".to_vec());
/// let mut input = Cursor::new(input_bytes);
///
/// let criteria = FilterCriteria{ pattern: Some("chr".to_string()), min_len: Some(5), ..Default::default() };
/// let options = FormatOptions{ unwrap: true, dealign: true, ..Default::default() };
///
/// let mut output: Vec<u8> = Vec::new();
/// let n_written = filter_from_read_to_write(&criteria, &options, &mut input, &mut output).unwrap();
///
/// assert_eq!(n_written, 1);
/// assert_eq!(output, b">chr1\nACGTACGTAC\n".to_vec());
/// ```
///
pub fn filter_from_read_to_write<R: Read, W: Write>(
    criteria: &FilterCriteria,
    options: &FormatOptions,
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<usize, E> {
    let mut n_written = 0;
    for record in Parser::new(conn_in) {
        let record = record?;
        if criteria.evaluate(&record) {
            printer::write_record(&options.apply(record), conn_out)?;
            n_written += 1;
        }
    }
    conn_out.flush()?;
    Ok(n_written)
}

/// Filter and reformat all records from [Read] into memory.
///
/// ## Usage
///
/// ```rust
/// use fakit::{filter_from_read, Record};
/// use fakit::filter::FilterCriteria;
/// use fakit::printer::FormatOptions;
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(b">r1\nAC\n>r2\nACGT\n>r3\nACG\n".to_vec());
///
/// let criteria = FilterCriteria{ exclude: Some("r2".to_string()), ..Default::default() };
/// let options = FormatOptions{ suffix: Some("kept".to_string()), ..Default::default() };
///
/// let got = filter_from_read(&criteria, &options, &mut input).unwrap();
///
/// assert_eq!(got, vec![Record::new("r1_kept", "AC"), Record::new("r3_kept", "ACG")]);
/// ```
///
pub fn filter_from_read<R: Read>(
    criteria: &FilterCriteria,
    options: &FormatOptions,
    conn_in: &mut R,
) -> Result<Vec<Record>, E> {
    let mut records: Vec<Record> = Vec::new();
    for record in Parser::new(conn_in) {
        let record = record?;
        if criteria.evaluate(&record) {
            records.push(options.apply(record));
        }
    }
    Ok(records)
}

/// Sequence length statistics for all records in [Read].
///
/// Returns [NoRecords](stats::NoRecords) if the input has no records.
///
/// ## Usage
///
/// ```rust
/// use fakit::stats_from_read;
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(b">a\nACGTACGTAC\n>b\nACGTACGTAC\nACGTACGTAC\n>c\nACGTACGTAC\nACGTACGTAC\nACGTACGTAC\n".to_vec());
/// let got = stats_from_read(&mut input).unwrap();
///
/// assert_eq!(got.longest, 30);
/// assert_eq!(got.shortest, 10);
/// assert_eq!(got.total_seq, 3);
/// assert_eq!(got.total_base, 60);
/// assert_eq!(got.average, 20.0);
/// ```
///
pub fn stats_from_read<R: Read>(
    conn_in: &mut R,
) -> Result<Summary, E> {
    let mut stats = LengthStats::new();
    for record in Parser::new(conn_in).keep_line_breaks(false) {
        stats.add(record?.len());
    }
    stats.finish()
}

/// Translate records from [Read] and write the proteins to [Write].
///
/// Records whose length is not a multiple of 3 are skipped with a warning.
///
/// Returns the number of records written.
///
/// ## Usage
///
/// ```rust
/// use fakit::translate_from_read_to_write;
/// use fakit::translate::CodonTable;
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(b">orf1\nATGAAA\nTGA\n>fragment\nATGAA\n>orf2\nATGTGG\n".to_vec());
/// let table = CodonTable::new(11).unwrap();
///
/// let mut output: Vec<u8> = Vec::new();
/// let n_written = translate_from_read_to_write(&table, &mut input, &mut output).unwrap();
///
/// assert_eq!(n_written, 2);
/// assert_eq!(output, b">orf1\nMK*\n>orf2\nMW\n".to_vec());
/// ```
///
pub fn translate_from_read_to_write<R: Read, W: Write>(
    table: &CodonTable,
    conn_in: &mut R,
    conn_out: &mut W,
) -> Result<usize, E> {
    let mut n_written = 0;
    for record in Parser::new(conn_in).keep_line_breaks(false) {
        match table.translate_record(&record?) {
            Ok(protein) => {
                printer::write_record(&protein, conn_out)?;
                n_written += 1;
            },
            Err(e) if e.is::<LengthNotMultipleOfThree>() => warn!("skipping record: {}", e),
            Err(e) => return Err(e),
        }
    }
    conn_out.flush()?;
    Ok(n_written)
}

/// Run fakit with `options`.
///
/// Validates the options, then reads `options.input` and writes to
/// `options.output` (stdout if None) according to the [Mode].
pub fn run(
    options: &Options,
) -> Result<(), E> {
    let mode = options.validate()?;
    info!("running in {:?} mode", mode);

    match mode {
        Mode::Filter => {
            let criteria = options.filter_criteria()?;
            let format = options.format_options();
            if criteria.is_empty() && format.is_empty() {
                info!("no filters or formatting given, copying records as they are");
            }
            let mut conn_in = io::open_input(&options.input)?;
            let mut conn_out = Sink::create(options.output.as_deref(), options.gzip)?;

            let n_written = filter_from_read_to_write(&criteria, &format, &mut conn_in, &mut conn_out)?;
            conn_out.finish()?;
            info!("wrote {} records", n_written);
        },

        Mode::Split(spec) => {
            let criteria = options.filter_criteria()?;
            let format = options.format_options();
            let mut conn_in = io::open_input(&options.input)?;

            let records = filter_from_read(&criteria, &format, &mut conn_in)?;
            info!("splitting {} records", records.len());

            let out_dir = options.split_dir();
            let paths = split::write_split(&records, &spec, &out_dir, options.gzip_output())?;
            info!("wrote {} files to {}", paths.len(), out_dir.display());
        },

        Mode::Stats => {
            let mut conn_in = io::open_input(&options.input)?;
            let summary = stats_from_read(&mut conn_in)?;

            let mut conn_out = Sink::create(options.output.as_deref(), options.gzip)?;
            conn_out.write_all(summary.to_string().as_bytes())?;
            conn_out.finish()?;
        },

        Mode::Translate(table_id) => {
            let table = CodonTable::new(table_id)?;
            info!("translating with codon table {}", table.id());
            let mut conn_in = io::open_input(&options.input)?;
            let mut conn_out = Sink::create(options.output.as_deref(), options.gzip)?;

            let n_written = translate_from_read_to_write(&table, &mut conn_in, &mut conn_out)?;
            conn_out.finish()?;
            info!("translated {} records", n_written);
        },
    }

    Ok(())
}

// Tests
#[cfg(test)]
mod tests {

    fn mock_fasta() -> Vec<u8> {
        let mut data: Vec<u8> = Vec::new();
        data.append(&mut b">ERR4035126.1 chr\nATGGCCAAA\nTTTGGG\n".to_vec());
        data.append(&mut b">ERR4035126.2 plasmid\nATG-CC-AAA\n".to_vec());
        data.append(&mut b">ERR4035126.3 chr\nATGC\n".to_vec());
        data.append(&mut b">ERR4035126.4 virus\n\n".to_vec());
        data
    }

    #[test]
    fn record_len_skips_line_breaks() {
        use super::Record;

        assert_eq!(Record::new("r", "ACGT\nAC").len(), 6);
        assert!(Record::new("r", "").is_empty());
    }

    #[test]
    fn identity_round_trip() {
        use super::{filter_from_read, filter_from_read_to_write};
        use crate::filter::FilterCriteria;
        use crate::printer::FormatOptions;
        use std::io::Cursor;

        let criteria = FilterCriteria::default();
        let options = FormatOptions::default();

        let mut input = Cursor::new(mock_fasta());
        let expected = filter_from_read(&criteria, &options, &mut input).unwrap();

        let mut input = Cursor::new(mock_fasta());
        let mut output: Vec<u8> = Vec::new();
        filter_from_read_to_write(&criteria, &options, &mut input, &mut output).unwrap();

        let mut reread = Cursor::new(output);
        let got = filter_from_read(&criteria, &options, &mut reread).unwrap();

        assert_eq!(got, expected);
        assert_eq!(got.len(), 4);
        assert_eq!(got[0].seq, "ATGGCCAAA\nTTTGGG");
    }

    #[test]
    fn filter_uses_length_before_dealign() {
        use super::filter_from_read;
        use crate::filter::FilterCriteria;
        use crate::printer::FormatOptions;
        use crate::Record;
        use std::io::Cursor;

        let criteria = FilterCriteria{ min_len: Some(10), ..Default::default() };
        let options = FormatOptions{ dealign: true, unwrap: true, ..Default::default() };

        let mut input = Cursor::new(mock_fasta());
        let got = filter_from_read(&criteria, &options, &mut input).unwrap();

        let expected = vec![
            Record::new("ERR4035126.1 chr", "ATGGCCAAATTTGGG"),
            Record::new("ERR4035126.2 plasmid", "ATGCCAAA"),
        ];

        assert_eq!(got, expected);
    }

    #[test]
    fn filter_writes_records_before_parse_error() {
        use super::filter_from_read_to_write;
        use crate::filter::FilterCriteria;
        use crate::parser::EmptyIdentifier;
        use crate::printer::FormatOptions;
        use std::io::Cursor;

        let mut input = Cursor::new(b">r1\nAC\n>r2\nGT\n>\nTT\n".to_vec());
        let mut output: Vec<u8> = Vec::new();
        let err = filter_from_read_to_write(&FilterCriteria::default(), &FormatOptions::default(), &mut input, &mut output).unwrap_err();

        assert_eq!(err.downcast_ref::<EmptyIdentifier>(), Some(&EmptyIdentifier{ line: 5 }));
        assert_eq!(output, b">r1\nAC\n>r2\nGT\n".to_vec());
    }

    #[test]
    fn stats_on_empty_input() {
        use super::stats_from_read;
        use crate::stats::NoRecords;
        use std::io::Cursor;

        let mut input = Cursor::new(b"no records here\n".to_vec());
        let err = stats_from_read(&mut input).unwrap_err();

        assert!(err.downcast_ref::<NoRecords>().is_some());
    }

    #[test]
    fn translate_skips_partial_codons() {
        use super::translate_from_read_to_write;
        use crate::translate::CodonTable;
        use std::io::Cursor;

        let mut input = Cursor::new(mock_fasta());
        let mut output: Vec<u8> = Vec::new();
        let n_written = translate_from_read_to_write(&CodonTable::default(), &mut input, &mut output).unwrap();

        assert_eq!(n_written, 2);
        assert_eq!(output, b">ERR4035126.1 chr\nMAKFG\n>ERR4035126.4 virus\n\n".to_vec());
    }

    #[test]
    fn run_filter_to_gzip_file() {
        use super::run;
        use crate::config::Options;
        use crate::io::open_input;
        use crate::parser::Parser;
        use crate::Record;

        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("reads.fa");
        let output = tmp.path().join("filtered.fa.gz");
        let list = tmp.path().join("exclude.txt");
        std::fs::write(&input, mock_fasta()).unwrap();
        std::fs::write(&list, "ERR4035126.1 chr\nERR4035126.4 virus\n").unwrap();

        let options = Options{
            input, output: Some(output.clone()),
            exclude_list: Some(list), suffix: Some("x".to_string()),
            ..Default::default()
        };
        run(&options).unwrap();

        let mut conn_in = open_input(&output).unwrap();
        let got: Vec<Record> = Parser::new(&mut conn_in).map(|x| x.unwrap()).collect();

        assert_eq!(got, vec![Record::new("ERR4035126.2 plasmid_x", "ATG-CC-AAA"), Record::new("ERR4035126.3 chr_x", "ATGC")]);
    }

    #[test]
    fn run_split_by_file_count() {
        use super::run;
        use crate::config::Options;
        use crate::parser::Parser;
        use std::fs::File;

        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("reads.fa");
        let output = tmp.path().join("parts.fa");

        let mut data: Vec<u8> = Vec::new();
        (0..100).for_each(|idx| data.append(&mut format!(">read_{}\nACGT\n", idx).into_bytes()));
        std::fs::write(&input, data).unwrap();

        let options = Options{ input, output: Some(output), split_files: Some(10), ..Default::default() };
        run(&options).unwrap();

        let out_dir = tmp.path().join("parts_split");
        let got: Vec<usize> = (1..=10).map(|idx| {
            let mut conn_in = File::open(out_dir.join(format!("seq_{}.fa", idx))).unwrap();
            Parser::new(&mut conn_in).count()
        }).collect();

        assert_eq!(got, vec![10; 10]);
        assert!(!out_dir.join("seq_11.fa").exists());
    }

    #[test]
    fn run_stats_to_file() {
        use super::run;
        use crate::config::Options;

        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("reads.fa");
        let output = tmp.path().join("stats.tsv");
        std::fs::write(&input, mock_fasta()).unwrap();

        let options = Options{ input, output: Some(output.clone()), stats: true, ..Default::default() };
        run(&options).unwrap();

        let got = std::fs::read_to_string(&output).unwrap();
        let expected = "longest\t15\nshortest\t0\ntotal_seq\t4\ntotal_base\t29\naverage\t7.25\n".to_string();

        assert_eq!(got, expected);
    }

    #[test]
    fn run_rejects_config_before_io() {
        use super::run;
        use crate::config::{ConfigError, Options};

        let tmp = tempfile::tempdir().unwrap();
        let output = tmp.path().join("out.fa");

        let options = Options{
            input: tmp.path().join("missing.fa"), output: Some(output.clone()),
            min_len: Some(200), max_len: Some(100),
            ..Default::default()
        };
        let err = run(&options).unwrap_err();

        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::InvalidLengthRange{ min: 200, max: 100 }));
        assert!(!output.exists());
    }

    #[test]
    fn run_missing_input() {
        use super::run;
        use crate::config::Options;
        use crate::io::OpenError;

        let tmp = tempfile::tempdir().unwrap();
        let options = Options{ input: tmp.path().join("missing.fa"), stats: true, ..Default::default() };

        let err = run(&options).unwrap_err();

        assert!(err.downcast_ref::<OpenError>().is_some());
    }
}
