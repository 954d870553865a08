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

//! Opening plain or gzip-compressed inputs and outputs.
//!
//! Compression is decided from the path: names ending in `.gz` are read and
//! written through [flate2]. Output can also be compressed on request.
//! The path `-` means standard input, and a missing output path means
//! standard output.
//!

use std::fs::File;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;

type E = Box<dyn std::error::Error>;

/// A file or directory that could not be opened or created.
#[derive(Debug)]
pub struct OpenError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl std::fmt::Display for OpenError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for OpenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

pub fn is_gzipped(
    path: &Path,
) -> bool {
    path.to_string_lossy().ends_with(".gz")
}

pub fn is_stdio(
    path: &Path,
) -> bool {
    path.as_os_str() == "-"
}

/// Opens `path` for reading, decompressing `.gz` files.
pub fn open_input(
    path: &Path,
) -> Result<Box<dyn Read>, E> {
    if is_stdio(path) {
        return Ok(Box::new(std::io::stdin()))
    }

    let conn_in = File::open(path).map_err(|source| {
        OpenError{ path: path.to_path_buf(), source }
    })?;

    if is_gzipped(path) {
        Ok(Box::new(MultiGzDecoder::new(conn_in)))
    } else {
        Ok(Box::new(conn_in))
    }
}

/// Buffered output to a file or stdout, optionally gzip-compressed.
///
/// Call [finish](Sink::finish) after the last write so the gzip trailer is
/// written and errors from the final flush are reported.
pub enum Sink {
    Plain(BufWriter<Box<dyn Write>>),
    Gzip(GzEncoder<BufWriter<Box<dyn Write>>>),
}

impl Sink {
    /// Opens `path` for writing, or stdout if `path` is None or `-`.
    ///
    /// Output is compressed if `gzip` is set or `path` ends in `.gz`.
    pub fn create(
        path: Option<&Path>,
        gzip: bool,
    ) -> Result<Self, E> {
        let (conn_out, gzip): (Box<dyn Write>, bool) = match path {
            Some(path) if !is_stdio(path) => {
                let conn_out = File::create(path).map_err(|source| {
                    OpenError{ path: path.to_path_buf(), source }
                })?;
                (Box::new(conn_out), gzip || is_gzipped(path))
            },
            _ => (Box::new(std::io::stdout()), gzip),
        };

        let conn_out = BufWriter::new(conn_out);
        if gzip {
            Ok(Sink::Gzip(GzEncoder::new(conn_out, Compression::default())))
        } else {
            Ok(Sink::Plain(conn_out))
        }
    }

    pub fn finish(
        self,
    ) -> Result<(), E> {
        match self {
            Sink::Plain(mut conn_out) => conn_out.flush()?,
            Sink::Gzip(encoder) => encoder.finish()?.flush()?,
        }
        Ok(())
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Sink::Plain(conn_out) => conn_out.write(buf),
            Sink::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Sink::Plain(conn_out) => conn_out.flush(),
            Sink::Gzip(encoder) => encoder.flush(),
        }
    }
}
