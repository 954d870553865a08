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

//! Keep or drop records by name, name lists, and sequence length.
//!
//! Every constraint in [FilterCriteria] is optional. A record is kept only if
//! it passes all of the constraints that are set.
//!
//! ## Usage
//!
//! ```rust
//! use fakit::Record;
//! use fakit::filter::{FilterCriteria, NameList};
//!
//! let criteria = FilterCriteria {
//!     pattern_list: Some(NameList::from_iter(["abc", "xyz"])),
//!     min_len: Some(4),
//!     ..Default::default()
//! };
//!
//! assert!(criteria.evaluate(&Record::new("abc123", "ACGT")));
//! assert!(!criteria.evaluate(&Record::new("abc123", "ACG")));
//! assert!(!criteria.evaluate(&Record::new("qqq", "ACGT")));
//! ```
//!

use crate::Record;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use bstr::ByteSlice;
use indexmap::IndexSet;

type E = Box<dyn std::error::Error>;

/// Identifiers or identifier substrings loaded from a list file.
///
/// The file has one entry per line. Entries are stored once, in the order
/// they first appear. Blank lines are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameList {
    entries: IndexSet<String>,
}

impl NameList {
    /// Reads a list file.
    pub fn from_path(
        path: &Path,
    ) -> Result<Self, E> {
        let mut conn_in = File::open(path).map_err(|source| {
            crate::io::OpenError{ path: path.to_path_buf(), source }
        })?;
        Self::from_read(&mut conn_in)
    }

    pub fn from_read<R: Read>(
        conn_in: &mut R,
    ) -> Result<Self, E> {
        let mut contents: Vec<u8> = Vec::new();
        conn_in.read_to_end(&mut contents)?;

        let entries: IndexSet<String> = contents.lines()
            .filter(|line| !line.is_empty())
            .map(|line| line.to_str_lossy().into_owned())
            .collect();

        Ok(NameList{ entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }

    /// Exact membership.
    pub fn contains(
        &self,
        id: &str,
    ) -> bool {
        self.entries.contains(id)
    }

    /// True if `id` contains at least one entry as a substring.
    ///
    /// Counts the entries that do not occur in `id`; the check fails only
    /// when that count equals the number of entries. An empty list matches
    /// nothing.
    pub fn matches_any_substring(
        &self,
        id: &str,
    ) -> bool {
        let misses = self.entries.iter()
            .filter(|entry| !id.as_bytes().contains_str(entry.as_bytes()))
            .count();
        misses < self.entries.len()
    }
}

impl<S: Into<String>> FromIterator<S> for NameList {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        NameList{ entries: iter.into_iter().map(|x| x.into()).collect() }
    }
}

/// Optional constraints on the identifier and sequence length of a record.
///
/// Both length bounds are inclusive. Checking that `min_len <= max_len` is
/// left to [Options::validate](crate::config::Options::validate).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Keep only this identifier.
    pub name: Option<String>,
    /// Drop this identifier.
    pub exclude: Option<String>,
    /// Keep identifiers containing this substring.
    pub pattern: Option<String>,
    /// Keep identifiers in this list.
    pub name_list: Option<NameList>,
    /// Drop identifiers in this list.
    pub exclude_list: Option<NameList>,
    /// Keep identifiers containing any substring in this list.
    pub pattern_list: Option<NameList>,
    pub min_len: Option<usize>,
    pub max_len: Option<usize>,
}

impl FilterCriteria {
    /// True if no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Returns true if `record` passes every constraint that is set.
    pub fn evaluate(
        &self,
        record: &Record,
    ) -> bool {
        let id: &str = &record.id;

        if self.name.as_ref().is_some_and(|name| name != id) {
            return false
        }
        if self.exclude.as_ref().is_some_and(|exclude| exclude == id) {
            return false
        }
        if self.pattern.as_ref().is_some_and(|pattern| !id.as_bytes().contains_str(pattern.as_bytes())) {
            return false
        }
        if self.name_list.as_ref().is_some_and(|list| !list.contains(id)) {
            return false
        }
        if self.exclude_list.as_ref().is_some_and(|list| list.contains(id)) {
            return false
        }
        if self.pattern_list.as_ref().is_some_and(|list| !list.matches_any_substring(id)) {
            return false
        }

        if self.min_len.is_some() || self.max_len.is_some() {
            let len = record.len();
            if self.min_len.is_some_and(|min| len < min) {
                return false
            }
            if self.max_len.is_some_and(|max| len > max) {
                return false
            }
        }

        true
    }
}
