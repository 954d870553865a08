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

//! Partition records into numbered FASTA files.
//!
//! Records are split either into a fixed number of files
//! ([SplitSpec::Files]) or into files holding a fixed number of records
//! ([SplitSpec::Records]). Files are written to a directory as `seq_1.fa`,
//! `seq_2.fa`, and so on, in input order.
//!
//! With [SplitSpec::Files] every file but the last gets `total / n` records
//! (rounded down) and the last file gets the rest. With
//! [SplitSpec::Records] the last file holds whatever is left over.
//!

use crate::Record;
use crate::io::Sink;
use crate::printer::write_record;

use std::path::Path;
use std::path::PathBuf;

use log::info;
use log::warn;

type E = Box<dyn std::error::Error>;

/// Extensions removed from the output name before adding [SPLIT_DIR_SUFFIX].
pub const FASTA_EXTENSIONS: [&str; 4] = [".fa", ".fasta", ".fna", ".faa"];

pub const SPLIT_DIR_SUFFIX: &str = "_split";

/// How to split the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitSpec {
    /// Write exactly this many files.
    Files(usize),
    /// Write this many records per file.
    Records(usize),
}

/// Splits `records` into consecutive, in-order chunks, one per output file.
///
/// ## Usage
///
/// ```rust
/// use fakit::Record;
/// use fakit::split::{partition, SplitSpec};
///
/// let records: Vec<Record> = (0..105).map(|idx| Record::new(&format!("r{}", idx), "ACGT")).collect();
///
/// let parts = partition(&records, &SplitSpec::Files(10));
/// let sizes: Vec<usize> = parts.iter().map(|x| x.len()).collect();
///
/// assert_eq!(sizes, vec![10, 10, 10, 10, 10, 10, 10, 10, 10, 15]);
/// assert_eq!(parts[9][14].id, "r104");
/// ```
///
pub fn partition<'a>(
    records: &'a [Record],
    spec: &SplitSpec,
) -> Vec<&'a [Record]> {
    match *spec {
        SplitSpec::Files(0) | SplitSpec::Records(0) => Vec::new(),
        SplitSpec::Files(n_files) => {
            let per_file = records.len() / n_files;
            let mut parts: Vec<&[Record]> = (0..(n_files - 1)).map(|idx| {
                &records[(idx * per_file)..((idx + 1) * per_file)]
            }).collect();
            parts.push(&records[((n_files - 1) * per_file)..]);
            parts
        },
        SplitSpec::Records(per_file) => records.chunks(per_file).collect(),
    }
}

/// Name of the directory split files go to.
///
/// Strips `.gz` and a FASTA extension from the file name of `base` and
/// appends [SPLIT_DIR_SUFFIX], keeping the parent directory.
pub fn split_dir(
    base: &Path,
) -> PathBuf {
    let name = base.file_name().map(|x| x.to_string_lossy().to_string()).unwrap_or_default();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    let stem = FASTA_EXTENSIONS.iter().find_map(|ext| name.strip_suffix(*ext)).unwrap_or(name);
    base.with_file_name(format!("{}{}", stem, SPLIT_DIR_SUFFIX))
}

/// Path of the `index`th (1-based) split file in `out_dir`.
pub fn split_file_path(
    out_dir: &Path,
    index: usize,
    gzip: bool,
) -> PathBuf {
    let extension = if gzip { "fa.gz" } else { "fa" };
    out_dir.join(format!("seq_{}.{}", index, extension))
}

/// Writes `records` into numbered files in `out_dir`.
///
/// Creates `out_dir` if it does not exist. Existing split files with the same
/// names are overwritten.
///
/// Returns the paths of the files written.
///
/// ## Usage
///
/// ```rust
/// use fakit::Record;
/// use fakit::split::{write_split, SplitSpec};
///
/// let records: Vec<Record> = (0..5).map(|idx| Record::new(&format!("r{}", idx), "ACGT")).collect();
///
/// let tmp = tempfile::tempdir().unwrap();
/// let out_dir = tmp.path().join("reads_split");
/// let paths = write_split(&records, &SplitSpec::Records(2), &out_dir, false).unwrap();
///
/// assert_eq!(paths, vec![out_dir.join("seq_1.fa"), out_dir.join("seq_2.fa"), out_dir.join("seq_3.fa")]);
/// assert_eq!(std::fs::read_to_string(&paths[2]).unwrap(), ">r4\nACGT\n");
/// ```
///
pub fn write_split(
    records: &[Record],
    spec: &SplitSpec,
    out_dir: &Path,
    gzip: bool,
) -> Result<Vec<PathBuf>, E> {
    if let SplitSpec::Files(n_files) = spec {
        if records.len() < *n_files {
            warn!("only {} records to split into {} files, some files will be empty", records.len(), n_files);
        }
    }

    std::fs::create_dir_all(out_dir).map_err(|source| {
        crate::io::OpenError{ path: out_dir.to_path_buf(), source }
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for (idx, part) in partition(records, spec).iter().enumerate() {
        let path = split_file_path(out_dir, idx + 1, gzip);
        let mut conn_out = Sink::create(Some(&path), gzip)?;
        for record in part.iter() {
            write_record(record, &mut conn_out)?;
        }
        conn_out.finish()?;

        info!("wrote {} records to {}", part.len(), path.display());
        paths.push(path);
    }

    Ok(paths)
}
