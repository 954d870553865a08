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

//! Sequence length statistics.

type E = Box<dyn std::error::Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoRecords;

impl std::fmt::Display for NoRecords {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "no sequences in input, cannot compute length statistics")
    }
}

impl std::error::Error for NoRecords {}

/// Running totals over sequence lengths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LengthStats {
    longest: usize,
    shortest: usize,
    n_seqs: usize,
    n_bases: usize,
}

/// Final statistics from [LengthStats::finish].
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub longest: usize,
    pub shortest: usize,
    pub total_seq: usize,
    pub total_base: usize,
    pub average: f64,
}

impl LengthStats {
    pub fn new() -> Self {
        LengthStats::default()
    }

    pub fn add(
        &mut self,
        len: usize,
    ) {
        if self.n_seqs == 0 {
            self.longest = len;
            self.shortest = len;
        } else {
            self.longest = self.longest.max(len);
            self.shortest = self.shortest.min(len);
        }
        self.n_seqs += 1;
        self.n_bases += len;
    }

    /// Returns the statistics, or [NoRecords] if nothing was added.
    pub fn finish(
        &self,
    ) -> Result<Summary, E> {
        if self.n_seqs == 0 {
            return Err(Box::new(NoRecords{}))
        }
        Ok(Summary {
            longest: self.longest,
            shortest: self.shortest,
            total_seq: self.n_seqs,
            total_base: self.n_bases,
            average: self.n_bases as f64 / self.n_seqs as f64,
        })
    }
}

impl std::iter::Extend<usize> for LengthStats {
    fn extend<T: IntoIterator<Item = usize>>(&mut self, iter: T) {
        iter.into_iter().for_each(|len| self.add(len));
    }
}

/// Prints one `key\tvalue` line per statistic.
impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "longest\t{}", self.longest)?;
        writeln!(f, "shortest\t{}", self.shortest)?;
        writeln!(f, "total_seq\t{}", self.total_seq)?;
        writeln!(f, "total_base\t{}", self.total_base)?;
        writeln!(f, "average\t{:.2}", self.average)
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn summarize_lengths() {
        use super::{LengthStats, Summary};

        let mut stats = LengthStats::new();
        stats.extend([10, 20, 30]);

        let got = stats.finish().unwrap();
        let expected = Summary{ longest: 30, shortest: 10, total_seq: 3, total_base: 60, average: 20.0 };

        assert_eq!(got, expected);
    }

    #[test]
    fn summarize_unordered_with_zero_length() {
        use super::{LengthStats, Summary};

        let mut stats = LengthStats::new();
        stats.extend([7, 0, 3]);

        let got = stats.finish().unwrap();
        let expected = Summary{ longest: 7, shortest: 0, total_seq: 3, total_base: 10, average: 10.0 / 3.0 };

        assert_eq!(got, expected);
    }

    #[test]
    fn summarize_nothing() {
        use super::{LengthStats, NoRecords};

        let got = LengthStats::new().finish().unwrap_err();

        assert!(got.downcast_ref::<NoRecords>().is_some());
    }

    #[test]
    fn print_summary() {
        use super::LengthStats;

        let mut stats = LengthStats::new();
        stats.extend([4, 5]);

        let got = stats.finish().unwrap().to_string();
        let expected = "longest\t5\nshortest\t4\ntotal_seq\t2\ntotal_base\t9\naverage\t4.50\n".to_string();

        assert_eq!(got, expected);
    }
}
