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

//! Run options and the checks that decide which mode to run in.
//!
//! [Options] holds everything the command line can set. Before anything is
//! read or written, [Options::validate] rejects conflicting or nonsensical
//! combinations with a [ConfigError] and otherwise returns the [Mode] to run.
//!
//! ## Usage
//!
//! ```rust
//! use fakit::config::{ConfigError, Mode, Options};
//! use fakit::split::SplitSpec;
//!
//! let options = Options{ split_files: Some(4), pattern: Some("plasmid".to_string()), ..Default::default() };
//! assert_eq!(options.validate(), Ok(Mode::Split(SplitSpec::Files(4))));
//!
//! let options = Options{ stats: true, split_files: Some(4), ..Default::default() };
//! assert_eq!(options.validate(), Err(ConfigError::StatsConflict));
//! ```
//!

use crate::filter::FilterCriteria;
use crate::filter::NameList;
use crate::printer::FormatOptions;
use crate::split::SplitSpec;

use std::path::PathBuf;

type E = Box<dyn std::error::Error>;

/// What a run does with the input.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Filter and reformat records into a single output.
    Filter,
    /// Filter and reformat records, then split them into several files.
    Split(SplitSpec),
    /// Print sequence length statistics.
    Stats,
    /// Translate records with the NCBI codon table of this number.
    Translate(u8),
}

#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Translation combined with filtering, reformatting, splitting, or statistics.
    TranslateConflict,
    /// Statistics combined with filtering, reformatting, splitting, or translation.
    StatsConflict,
    /// Both split modes given.
    SplitConflict,
    /// A codon table given without translation.
    TableWithoutTranslate,
    UnknownCodonTable(u8),
    /// Maximum length below minimum length.
    InvalidLengthRange{ min: usize, max: usize },
    /// Splitting into a single file.
    SingleSplitFile,
    /// Splitting into zero files or files of zero records.
    ZeroSplit,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::TranslateConflict => write!(f, "--translate cannot be combined with filtering, formatting, splitting, or --stats"),
            ConfigError::StatsConflict => write!(f, "--stats cannot be combined with filtering, formatting, splitting, or --translate"),
            ConfigError::SplitConflict => write!(f, "--split-files and --split-records cannot be used together"),
            ConfigError::TableWithoutTranslate => write!(f, "--table requires --translate"),
            ConfigError::UnknownCodonTable(id) => write!(f, "unknown codon table {}", id),
            ConfigError::InvalidLengthRange{ min, max } => write!(f, "--max-len {} is smaller than --min-len {}", max, min),
            ConfigError::SingleSplitFile => write!(f, "splitting into 1 file does nothing"),
            ConfigError::ZeroSplit => write!(f, "split size must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Options for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    // Input and output
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub gzip: bool,

    // Filters
    pub name: Option<String>,
    pub exclude: Option<String>,
    pub pattern: Option<String>,
    pub name_list: Option<PathBuf>,
    pub exclude_list: Option<PathBuf>,
    pub pattern_list: Option<PathBuf>,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,

    // Formatting
    pub suffix: Option<String>,
    pub dealign: bool,
    pub unwrap: bool,

    // Modes
    pub translate: bool,
    pub table: Option<u8>,
    pub split_files: Option<usize>,
    pub split_records: Option<usize>,
    pub stats: bool,
}

impl Options {
    fn has_filters(&self) -> bool {
        self.name.is_some() || self.exclude.is_some() || self.pattern.is_some()
            || self.name_list.is_some() || self.exclude_list.is_some() || self.pattern_list.is_some()
            || self.min_len.is_some() || self.max_len.is_some()
    }

    fn has_formatting(&self) -> bool {
        self.suffix.is_some() || self.dealign || self.unwrap
    }

    fn has_split(&self) -> bool {
        self.split_files.is_some() || self.split_records.is_some()
    }

    /// Checks the option combination and returns the mode to run in.
    pub fn validate(
        &self,
    ) -> Result<Mode, ConfigError> {
        if self.translate && (self.has_filters() || self.has_formatting() || self.has_split() || self.stats) {
            return Err(ConfigError::TranslateConflict)
        }
        if self.stats && (self.has_filters() || self.has_formatting() || self.has_split()) {
            return Err(ConfigError::StatsConflict)
        }
        if self.split_files.is_some() && self.split_records.is_some() {
            return Err(ConfigError::SplitConflict)
        }
        if let (Some(min), Some(max)) = (self.min_len, self.max_len) {
            if max < min {
                return Err(ConfigError::InvalidLengthRange{ min, max })
            }
        }

        if self.translate {
            let table = self.table.unwrap_or(1);
            if crate::translate::tables::amino_acids(table).is_none() {
                return Err(ConfigError::UnknownCodonTable(table))
            }
            return Ok(Mode::Translate(table))
        } else if self.table.is_some() {
            return Err(ConfigError::TableWithoutTranslate)
        }

        if self.stats {
            return Ok(Mode::Stats)
        }

        match (self.split_files, self.split_records) {
            (Some(1), _) => Err(ConfigError::SingleSplitFile),
            (Some(0), _) | (_, Some(0)) => Err(ConfigError::ZeroSplit),
            (Some(n_files), _) => Ok(Mode::Split(SplitSpec::Files(n_files))),
            (_, Some(n_records)) => Ok(Mode::Split(SplitSpec::Records(n_records))),
            (None, None) => Ok(Mode::Filter),
        }
    }

    /// Builds the filter, reading any list files once.
    pub fn filter_criteria(
        &self,
    ) -> Result<FilterCriteria, E> {
        let load = |path: &Option<PathBuf>| -> Result<Option<NameList>, E> {
            path.as_deref().map(NameList::from_path).transpose()
        };

        Ok(FilterCriteria {
            name: self.name.clone(),
            exclude: self.exclude.clone(),
            pattern: self.pattern.clone(),
            name_list: load(&self.name_list)?,
            exclude_list: load(&self.exclude_list)?,
            pattern_list: load(&self.pattern_list)?,
            min_len: self.min_len,
            max_len: self.max_len,
        })
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            suffix: self.suffix.clone(),
            unwrap: self.unwrap,
            dealign: self.dealign,
        }
    }

    /// True if output should be gzip-compressed.
    pub fn gzip_output(&self) -> bool {
        self.gzip || self.output.as_deref().is_some_and(crate::io::is_gzipped)
    }

    /// Directory that split files are written to.
    ///
    /// Derived from the output path, or from the input file name if there is
    /// no output path.
    pub fn split_dir(&self) -> PathBuf {
        match &self.output {
            Some(output) => crate::split::split_dir(output),
            None if crate::io::is_stdio(&self.input) => crate::split::split_dir(&PathBuf::from("stdin")),
            None => {
                let name = self.input.file_name().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("seq"));
                crate::split::split_dir(&name)
            },
        }
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn default_is_filter_mode() {
        use super::{Mode, Options};

        let got = Options::default().validate();

        assert_eq!(got, Ok(Mode::Filter));
    }

    #[test]
    fn translate_conflicts() {
        use super::{ConfigError, Options};

        let conflicting = vec![
            Options{ translate: true, name: Some("chr1".to_string()), ..Default::default() },
            Options{ translate: true, min_len: Some(10), ..Default::default() },
            Options{ translate: true, dealign: true, ..Default::default() },
            Options{ translate: true, split_records: Some(10), ..Default::default() },
            Options{ translate: true, stats: true, ..Default::default() },
        ];

        conflicting.iter().for_each(|options| {
            assert_eq!(options.validate(), Err(ConfigError::TranslateConflict));
        });
    }

    #[test]
    fn stats_conflicts() {
        use super::{ConfigError, Options};
        use std::path::PathBuf;

        let conflicting = vec![
            Options{ stats: true, pattern_list: Some(PathBuf::from("patterns.txt")), ..Default::default() },
            Options{ stats: true, split_files: Some(3), ..Default::default() },
            Options{ stats: true, unwrap: true, ..Default::default() },
        ];

        conflicting.iter().for_each(|options| {
            assert_eq!(options.validate(), Err(ConfigError::StatsConflict));
        });
    }

    #[test]
    fn translate_table() {
        use super::{ConfigError, Mode, Options};

        assert_eq!(Options{ translate: true, ..Default::default() }.validate(), Ok(Mode::Translate(1)));
        assert_eq!(Options{ translate: true, table: Some(11), ..Default::default() }.validate(), Ok(Mode::Translate(11)));
        assert_eq!(Options{ translate: true, table: Some(8), ..Default::default() }.validate(), Err(ConfigError::UnknownCodonTable(8)));
        assert_eq!(Options{ table: Some(2), ..Default::default() }.validate(), Err(ConfigError::TableWithoutTranslate));
    }

    #[test]
    fn invalid_length_range() {
        use super::{ConfigError, Mode, Options};

        let options = Options{ min_len: Some(200), max_len: Some(100), ..Default::default() };
        assert_eq!(options.validate(), Err(ConfigError::InvalidLengthRange{ min: 200, max: 100 }));

        let options = Options{ min_len: Some(100), max_len: Some(100), ..Default::default() };
        assert_eq!(options.validate(), Ok(Mode::Filter));
    }

    #[test]
    fn split_modes() {
        use super::{ConfigError, Mode, Options};
        use crate::split::SplitSpec;

        assert_eq!(Options{ split_files: Some(1), ..Default::default() }.validate(), Err(ConfigError::SingleSplitFile));
        assert_eq!(Options{ split_files: Some(0), ..Default::default() }.validate(), Err(ConfigError::ZeroSplit));
        assert_eq!(Options{ split_records: Some(0), ..Default::default() }.validate(), Err(ConfigError::ZeroSplit));
        assert_eq!(Options{ split_files: Some(2), split_records: Some(5), ..Default::default() }.validate(), Err(ConfigError::SplitConflict));
        assert_eq!(Options{ split_records: Some(1), ..Default::default() }.validate(), Ok(Mode::Split(SplitSpec::Records(1))));
        assert_eq!(Options{ split_files: Some(10), dealign: true, ..Default::default() }.validate(), Ok(Mode::Split(SplitSpec::Files(10))));
    }

    #[test]
    fn split_dir_from_output_or_input() {
        use super::Options;
        use std::path::PathBuf;

        let from_output = Options{ input: PathBuf::from("data/reads.fa"), output: Some(PathBuf::from("out/filtered.fa.gz")), ..Default::default() };
        let from_input = Options{ input: PathBuf::from("data/reads.fasta.gz"), ..Default::default() };
        let from_stdin = Options{ input: PathBuf::from("-"), ..Default::default() };

        assert_eq!(from_output.split_dir(), PathBuf::from("out/filtered_split"));
        assert_eq!(from_input.split_dir(), PathBuf::from("reads_split"));
        assert_eq!(from_stdin.split_dir(), PathBuf::from("stdin_split"));
    }

    #[test]
    fn gzip_from_flag_or_suffix() {
        use super::Options;
        use std::path::PathBuf;

        assert!(Options{ gzip: true, ..Default::default() }.gzip_output());
        assert!(Options{ output: Some(PathBuf::from("out.fa.gz")), ..Default::default() }.gzip_output());
        assert!(!Options{ output: Some(PathBuf::from("out.fa")), ..Default::default() }.gzip_output());
    }

    #[test]
    fn filter_criteria_loads_lists() {
        use super::Options;

        let tmp = tempfile::tempdir().unwrap();
        let list = tmp.path().join("keep.txt");
        std::fs::write(&list, "chr1\nchr2\n").unwrap();

        let options = Options{ name_list: Some(list), min_len: Some(5), ..Default::default() };
        let got = options.filter_criteria().unwrap();

        assert_eq!(got.name_list.unwrap().len(), 2);
        assert_eq!(got.min_len, Some(5));
        assert!(got.exclude_list.is_none());
    }
}
