//! # Conversion Pipeline
//!
//! Runs both encoders over a document and writes every artifact: the raster
//! image, the document dump and, if a dimension is requested, the resized
//! image with its re-derived dump. Every artifact is written to its own file
//! and flushed before the next one is started.

use std::{
    ffi::OsString,
    fmt, io,
    path::{Path, PathBuf},
};

use image::imageops::FilterType;
use log::{debug, info, warn};

use crate::{
    codec, dump,
    encodings::{ColorEncoder, Encode, GrayscaleEncoder},
    instances::{fio, CnfDocument},
    raster::{Pixel, Raster},
};

/// Errors from reading the input or writing the artifacts
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input document could not be read
    #[error(transparent)]
    Parsing(#[from] fio::ParsingError),
    /// An artifact could not be written
    #[error("failed to write `{}`: {source}", path.display())]
    Io {
        /// The artifact
        path: PathBuf,
        /// The underlying error
        #[source]
        source: io::Error,
    },
    /// An image could not be encoded or resized
    #[error("failed to produce image `{}`: {source}", path.display())]
    Image {
        /// The artifact
        path: PathBuf,
        /// The underlying error
        #[source]
        source: codec::Error,
    },
}

/// The two raster encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Clause bytes as gray pixels
    Gray,
    /// Clause literals as color pixels
    Color,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Gray => write!(f, "grayscale"),
            Mode::Color => write!(f, "color"),
        }
    }
}

/// Options for the conversion
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Whether to produce the grayscale artifacts
    pub gray: bool,
    /// Whether to produce the color artifacts
    pub color: bool,
    /// The side length of the resized images, no resizing if `None`
    pub dimension: Option<u32>,
    /// The interpolation used for resizing
    pub filter: FilterType,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            gray: true,
            color: true,
            dimension: None,
            filter: FilterType::Triangle,
        }
    }
}

/// The paths of all artifacts, derived from a base name
///
/// For a base name `B` the grayscale artifacts are `B.original.bmp`, `B.bin`,
/// `B.scaled.bmp` and `B.scaled.bin`; the color artifacts carry an additional
/// `.color` infix, e.g. `B.color.original.bmp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    base: PathBuf,
}

impl OutputPaths {
    /// The base name used if none is given
    pub const DEFAULT_BASE: &'static str = "saida";

    /// Creates the artifact paths for a base name
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base: base.into() }
    }

    /// The base name
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// The path of the (resized) image of a mode
    #[must_use]
    pub fn image(&self, mode: Mode, scaled: bool) -> PathBuf {
        self.with_suffix(mode, if scaled { "scaled.bmp" } else { "original.bmp" })
    }

    /// The path of the binary dump of a mode, re-derived from the resized
    /// raster if `scaled`
    #[must_use]
    pub fn dump(&self, mode: Mode, scaled: bool) -> PathBuf {
        self.with_suffix(mode, if scaled { "scaled.bin" } else { "bin" })
    }

    fn with_suffix(&self, mode: Mode, suffix: &str) -> PathBuf {
        let mut name = OsString::from(self.base.as_os_str());
        if mode == Mode::Color {
            name.push(".color");
        }
        name.push(".");
        name.push(suffix);
        PathBuf::from(name)
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE)
    }
}

/// Writes all artifacts selected by the options
///
/// Returns the paths of the written artifacts in the order they were written.
/// Rasters with zero area (documents without clauses) only produce their
/// (empty) document dump, a warning is logged for the skipped images.
///
/// # Errors
///
/// On the first artifact that cannot be written. Artifacts written before are
/// complete.
pub fn convert(
    doc: &CnfDocument,
    paths: &OutputPaths,
    opts: &Options,
) -> Result<Vec<PathBuf>, Error> {
    let mut written = vec![];
    if opts.gray {
        render(&GrayscaleEncoder::new(doc), Mode::Gray, paths, opts, &mut written)?;
    }
    if opts.color {
        render(&ColorEncoder::new(doc), Mode::Color, paths, opts, &mut written)?;
    }
    Ok(written)
}

/// Parses a DIMACS CNF file and writes all artifacts selected by the options
///
/// The document comment is logged before any artifact is written. See
/// [`convert`] for the written artifacts.
///
/// # Errors
///
/// If the input cannot be read or parsed, or an artifact cannot be written.
pub fn convert_file<P: AsRef<Path>>(
    in_path: P,
    paths: &OutputPaths,
    opts: &Options,
) -> Result<Vec<PathBuf>, Error> {
    let in_path = in_path.as_ref();
    info!("reading CNF file {}", in_path.display());
    let doc = CnfDocument::from_dimacs_path(in_path)?;
    if !doc.comment().is_empty() {
        info!("{}", doc.comment());
    }
    convert(&doc, paths, opts)
}

fn render<E: Encode>(
    encoder: &E,
    mode: Mode,
    paths: &OutputPaths,
    opts: &Options,
    written: &mut Vec<PathBuf>,
) -> Result<(), Error> {
    info!("generating {mode} raster");
    let raster = encoder.encode();
    debug!(
        "{mode} raster has {} units on {}x{} cells",
        encoder.n_units(),
        raster.width(),
        raster.height()
    );

    if raster.is_empty() {
        warn!("document has no clauses, skipping {mode} images");
    } else {
        let path = paths.image(mode, false);
        write_image(&raster, &path)?;
        written.push(path);
    }

    info!("generating {mode} binary dump");
    let path = paths.dump(mode, false);
    write_file(&path, |writer| dump::write_document(encoder, writer).map(|_| ()))?;
    written.push(path);

    let Some(dim) = opts.dimension else {
        return Ok(());
    };
    if raster.is_empty() {
        return Ok(());
    }

    info!("generating resized {mode} raster ({dim}x{dim})");
    let path = paths.image(mode, true);
    let scaled = codec::resize(&raster, dim, dim, opts.filter).map_err(|source| Error::Image {
        path: path.clone(),
        source,
    })?;
    write_image(&scaled, &path)?;
    written.push(path);

    info!("generating resized {mode} binary dump");
    let path = paths.dump(mode, true);
    write_file(&path, |writer| dump::write_raster(&scaled, writer))?;
    written.push(path);
    Ok(())
}

fn write_file<F>(path: &Path, write: F) -> Result<(), Error>
where
    F: FnOnce(&mut io::BufWriter<std::fs::File>) -> io::Result<()>,
{
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = fio::open_write(path).map_err(io_err)?;
    write(&mut writer).map_err(io_err)?;
    io::Write::flush(&mut writer).map_err(io_err)
}

fn write_image<P: Pixel>(raster: &Raster<P>, path: &Path) -> Result<(), Error> {
    let mut writer = fio::open_write(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    codec::write_bmp(raster, &mut writer).map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })?;
    io::Write::flush(&mut writer).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{Mode, OutputPaths};

    #[test]
    fn artifact_names() {
        let paths = OutputPaths::new("out/inst.v1");
        assert_eq!(
            paths.image(Mode::Gray, false),
            PathBuf::from("out/inst.v1.original.bmp")
        );
        assert_eq!(paths.dump(Mode::Gray, false), PathBuf::from("out/inst.v1.bin"));
        assert_eq!(
            paths.image(Mode::Gray, true),
            PathBuf::from("out/inst.v1.scaled.bmp")
        );
        assert_eq!(
            paths.dump(Mode::Gray, true),
            PathBuf::from("out/inst.v1.scaled.bin")
        );
        assert_eq!(
            paths.image(Mode::Color, false),
            PathBuf::from("out/inst.v1.color.original.bmp")
        );
        assert_eq!(
            paths.dump(Mode::Color, false),
            PathBuf::from("out/inst.v1.color.bin")
        );
        assert_eq!(
            paths.dump(Mode::Color, true),
            PathBuf::from("out/inst.v1.color.scaled.bin")
        );
    }

    #[test]
    fn default_base() {
        assert_eq!(
            OutputPaths::default().dump(Mode::Gray, false),
            PathBuf::from("saida.bin")
        );
    }
}
