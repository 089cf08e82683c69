//! # Module for File IO (Writing and Parsing)
//!
//! As the submodules work on single lines, it is recommended to parse through
//! [`super::CnfDocument`] rather than using these functions directly.

use std::{fs::File, io, path::Path};

pub mod dimacs;

/// Combined Parsing Errors
#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    /// IO Errors
    #[error("IO error: {0}")]
    IO(#[from] io::Error),
    /// Dimacs Parsing Error, with the 1-based number and content of the offending line
    #[error("Dimacs error in line {line} (`{content}`): {source}")]
    Dimacs {
        /// The 1-based line number
        line: usize,
        /// The content of the line
        content: String,
        /// What was wrong with the line
        #[source]
        source: dimacs::Error,
    },
}

impl ParsingError {
    /// Gets the number of the offending line, if the error is a parsing error
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            ParsingError::IO(_) => None,
            ParsingError::Dimacs { line, .. } => Some(*line),
        }
    }
}

/// Opens a reader for the file at Path.
/// With feature `compression` supports bzip2, gzip and xz compression.
pub(crate) fn open_compressed_uncompressed_read<P: AsRef<Path>>(
    path: P,
) -> Result<Box<dyn io::Read>, io::Error> {
    let path = path.as_ref();
    let raw_reader = File::open(path)?;
    #[cfg(feature = "compression")]
    if let Some(ext) = path.extension() {
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("bz2")) {
            return Ok(Box::new(bzip2::read::BzDecoder::new(raw_reader)));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("gz")) {
            return Ok(Box::new(flate2::read::GzDecoder::new(raw_reader)));
        }
        if ext.eq_ignore_ascii_case(std::ffi::OsStr::new("xz")) {
            return Ok(Box::new(xz2::read::XzDecoder::new(raw_reader)));
        }
    }
    Ok(Box::new(raw_reader))
}

/// Opens a buffered writer for the file at Path, creating or truncating it.
pub(crate) fn open_write<P: AsRef<Path>>(path: P) -> Result<io::BufWriter<File>, io::Error> {
    Ok(io::BufWriter::new(File::create(path)?))
}
