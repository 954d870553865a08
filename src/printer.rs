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

//! Reformat [Record]s and print them as FASTA.
//!
//! [FormatOptions] rewrites the identifier and sequence of a record, and
//! [format_record] turns a record into its FASTA text block.
//! [write_record] writes the block with a trailing line break.
//!
//! ## Usage
//!
//! ```rust
//! use fakit::Record;
//! use fakit::printer::{write_record, FormatOptions};
//!
//! let options = FormatOptions{ suffix: Some("v2".to_string()), unwrap: true, dealign: true };
//!
//! let data = vec![Record::new("gene1", "ATG--GCC\nTAA"), Record::new("gene2", "ATGTAA")];
//!
//! let mut output: Vec<u8> = Vec::new();
//! for record in data {
//!     write_record(&options.apply(record), &mut output).unwrap();
//! }
//!
//! assert_eq!(output, b">gene1_v2\nATGGCCTAA\n>gene2_v2\nATGTAA\n".to_vec());
//! ```
//!

use crate::Record;

use std::io::Write;

type E = Box<dyn std::error::Error>;

/// Optional rewrites applied to every record before it is printed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Appended to the identifier as `_<suffix>`.
    pub suffix: Option<String>,
    /// Put the whole sequence on one line.
    pub unwrap: bool,
    /// Remove alignment gaps (`-`).
    pub dealign: bool,
}

impl FormatOptions {
    /// True if applying the options leaves every record unchanged.
    pub fn is_empty(&self) -> bool {
        *self == FormatOptions::default()
    }

    /// Applies the suffix, unwrap, and dealign steps in that order.
    pub fn apply(
        &self,
        mut record: Record,
    ) -> Record {
        if let Some(suffix) = &self.suffix {
            record.id.push('_');
            record.id.push_str(suffix);
        }
        if self.unwrap {
            record.seq.retain(|c| c != '\n' && c != '\r');
        }
        if self.dealign {
            record.seq.retain(|c| c != '-');
        }
        record
    }
}

/// Formats `record` as `>id\nseq` without a trailing line break.
pub fn format_record(
    record: &Record,
) -> String {
    let mut block = String::with_capacity(record.id.len() + record.seq.len() + 2);
    block.push('>');
    block.push_str(&record.id);
    block.push('\n');
    block.push_str(&record.seq);
    block
}

/// Writes `record` followed by a line break.
pub fn write_record<W: Write>(
    record: &Record,
    conn_out: &mut W,
) -> Result<(), E> {
    conn_out.write_all(format_record(record).as_bytes())?;
    conn_out.write_all(b"\n")?;
    Ok(())
}
