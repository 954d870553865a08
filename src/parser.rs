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

//! Streaming parser for FASTA records.
//!
//! [Parser] reads a [Read] line by line and returns one [Record] at a time
//! using next(). A line starting with `>` opens a new record and every
//! following line up to the next `>` line belongs to its sequence.
//!
//! Content before the first `>` line is skipped. Sequence lines are kept
//! verbatim, blank ones included, apart from the trailing line terminator.
//!
//! ## Usage
//!
//! ```rust
//! use fakit::Record;
//! use fakit::parser::Parser;
//! use std::io::Cursor;
//!
//! let mut input = Cursor::new(b">seq1 sample\nACGT\nAC\n>seq2\nTTTT\n".to_vec());
//!
//! let records: Vec<Record> = Parser::new(&mut input).map(|x| x.unwrap()).collect();
//!
//! assert_eq!(records[0], Record::new("seq1 sample", "ACGT\nAC"));
//! assert_eq!(records[1], Record::new("seq2", "TTTT"));
//! ```
//!

use crate::Record;

use std::io::BufRead;
use std::io::BufReader;
use std::io::Read;

type E = Box<dyn std::error::Error>;

/// A `>` line without an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyIdentifier {
    /// 1-based line number of the offending line.
    pub line: usize,
}

impl std::fmt::Display for EmptyIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "empty sequence identifier on line {}", self.line)
    }
}

impl std::error::Error for EmptyIdentifier {}

pub struct Parser<'a, R: Read> {
    reader: BufReader<&'a mut R>,
    line: String,
    line_number: usize,

    // Record whose sequence lines are still being read
    pending: Option<Record>,
    n_seq_lines: usize,

    // Returned on the call after the record it interrupted
    error: Option<EmptyIdentifier>,

    keep_line_breaks: bool,
    finished: bool,
}

impl<'a, R: Read> Parser<'a, R> {
    pub fn new(
        conn: &'a mut R,
    ) -> Self {
        Parser {
            reader: BufReader::new(conn),
            line: String::new(),
            line_number: 0,
            pending: None,
            n_seq_lines: 0,
            error: None,
            keep_line_breaks: true,
            finished: false,
        }
    }

    /// Join sequence lines with `\n` (true, default) or concatenate them (false).
    pub fn keep_line_breaks(
        mut self,
        keep: bool,
    ) -> Self {
        self.keep_line_breaks = keep;
        self
    }
}

impl<R: Read> Iterator for Parser<'_, R> {
    type Item = Result<Record, E>;

    fn next(
        &mut self,
    ) -> Option<Result<Record, E>> {
        if let Some(e) = self.error.take() {
            self.finished = true;
            return Some(Err(Box::new(e)))
        }
        if self.finished {
            return None
        }

        loop {
            self.line.clear();
            let nbytes = match self.reader.read_line(&mut self.line) {
                Ok(nbytes) => nbytes,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(Box::new(e)))
                },
            };

            if nbytes == 0 {
                self.finished = true;
                return self.pending.take().map(Ok)
            }
            self.line_number += 1;

            let line = self.line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            if let Some(id) = line.strip_prefix('>') {
                if id.is_empty() {
                    let e = EmptyIdentifier{ line: self.line_number };
                    return match self.pending.take() {
                        Some(done) => {
                            self.error = Some(e);
                            Some(Ok(done))
                        },
                        None => {
                            self.finished = true;
                            Some(Err(Box::new(e)))
                        },
                    }
                }
                self.n_seq_lines = 0;
                let opened = Record::new(id, "");
                if let Some(done) = self.pending.replace(opened) {
                    return Some(Ok(done))
                }
            } else if let Some(record) = self.pending.as_mut() {
                if self.keep_line_breaks && self.n_seq_lines > 0 {
                    record.seq.push('\n');
                }
                record.seq.push_str(line);
                self.n_seq_lines += 1;
            }
        }
    }
}
