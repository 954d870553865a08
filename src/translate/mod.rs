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

//! Translate nucleotide records to protein.
//!
//! Uses the NCBI genetic codes in [tables]. Translation reads the whole
//! sequence in frame 1 and does not stop at stop codons, which are written
//! as `*`. Codons containing anything other than `A`, `C`, `G`, `T`, or `U`
//! are written as `X`, except for the all-gap codon `---` which becomes `-`.
//!
//! ## Usage
//!
//! ```rust
//! use fakit::Record;
//! use fakit::translate::CodonTable;
//!
//! let table = CodonTable::new(1).unwrap();
//! let got = table.translate_record(&Record::new("orf1", "ATGGCC\nTAA")).unwrap();
//!
//! assert_eq!(got, Record::new("orf1", "MA*"));
//! ```
//!

pub mod tables;

use crate::Record;
use crate::config::ConfigError;

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthNotMultipleOfThree {
    pub id: String,
    pub len: usize,
}

impl std::fmt::Display for LengthNotMultipleOfThree {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "length of {} ({}) is not a multiple of 3", self.id, self.len)
    }
}

impl std::error::Error for LengthNotMultipleOfThree {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodonTable {
    id: u8,
    amino_acids: &'static [u8; 64],
}

// Position of a base in the T, C, A, G ordering of the tables
fn base_index(
    base: u8,
) -> Option<usize> {
    match base.to_ascii_uppercase() {
        b'T' | b'U' => Some(0),
        b'C' => Some(1),
        b'A' => Some(2),
        b'G' => Some(3),
        _ => None,
    }
}

impl CodonTable {
    /// NCBI translation table number `id`.
    ///
    /// Returns [ConfigError::UnknownCodonTable] if there is no such table.
    pub fn new(
        id: u8,
    ) -> Result<Self, E> {
        match tables::amino_acids(id) {
            Some(amino_acids) => Ok(CodonTable{ id, amino_acids }),
            None => Err(Box::new(ConfigError::UnknownCodonTable(id))),
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn translate_codon(
        &self,
        codon: &[u8; 3],
    ) -> u8 {
        if codon == b"---" {
            return b'-'
        }
        match (base_index(codon[0]), base_index(codon[1]), base_index(codon[2])) {
            (Some(first), Some(second), Some(third)) => self.amino_acids[16 * first + 4 * second + third],
            _ => b'X',
        }
    }

    /// Translates the sequence of `record`, ignoring line breaks.
    ///
    /// Returns [LengthNotMultipleOfThree] if the sequence cannot be read in
    /// whole codons.
    pub fn translate_record(
        &self,
        record: &Record,
    ) -> Result<Record, E> {
        let residues: Vec<u8> = record.seq.bytes().filter(|x| *x != b'\n').collect();
        if residues.len() % 3 != 0 {
            return Err(Box::new(LengthNotMultipleOfThree{ id: record.id.clone(), len: residues.len() }))
        }

        let protein: String = residues.chunks_exact(3).map(|codon| {
            let codon: [u8; 3] = [codon[0], codon[1], codon[2]];
            self.translate_codon(&codon) as char
        }).collect();

        Ok(Record{ id: record.id.clone(), seq: protein })
    }
}

impl Default for CodonTable {
    fn default() -> Self {
        CodonTable{ id: 1, amino_acids: tables::STANDARD }
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn translate_standard_code() {
        use super::CodonTable;
        use crate::Record;

        let table = CodonTable::new(1).unwrap();
        let got = table.translate_record(&Record::new("orf", "ATGGCCTAA")).unwrap();

        assert_eq!(got, Record::new("orf", "MA*"));
    }

    #[test]
    fn translate_vertebrate_mitochondrial() {
        use super::CodonTable;
        use crate::Record;

        let table = CodonTable::new(2).unwrap();
        let got = table.translate_record(&Record::new("mt", "ATAAGATGA")).unwrap();

        assert_eq!(got, Record::new("mt", "M*W"));
    }

    #[test]
    fn translate_lowercase_rna_and_ambiguous() {
        use super::CodonTable;
        use crate::Record;

        let table = CodonTable::default();
        let got = table.translate_record(&Record::new("rna", "augNNNuuu---gcR")).unwrap();

        assert_eq!(got, Record::new("rna", "MXF-X"));
    }

    #[test]
    fn translate_ignores_line_breaks() {
        use super::CodonTable;
        use crate::Record;

        let table = CodonTable::default();
        let got = table.translate_record(&Record::new("wrapped", "ATGG\nCCT\nAA")).unwrap();

        assert_eq!(got.seq, "MA*");
    }

    #[test]
    fn translate_wrong_length() {
        use super::{CodonTable, LengthNotMultipleOfThree};
        use crate::Record;

        let table = CodonTable::default();
        let err = table.translate_record(&Record::new("partial", "ATGGC")).unwrap_err();

        let expected = LengthNotMultipleOfThree{ id: "partial".to_string(), len: 5 };
        assert_eq!(err.downcast_ref::<LengthNotMultipleOfThree>(), Some(&expected));
    }

    #[test]
    fn translate_empty_sequence() {
        use super::CodonTable;
        use crate::Record;

        let got = CodonTable::default().translate_record(&Record::new("empty", "")).unwrap();

        assert_eq!(got, Record::new("empty", ""));
    }

    #[test]
    fn unknown_table() {
        use super::CodonTable;
        use crate::config::ConfigError;

        let err = CodonTable::new(7).unwrap_err();

        assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::UnknownCodonTable(7)));
    }
}
