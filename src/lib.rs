//! # cnf2img - Raster Encodings of CNF Instances
//!
//! `cnf2img` draws DIMACS CNF instances as images, e.g. for extracting
//! features of SAT problems with image-based machine learning. A document is
//! parsed once into a [`instances::CnfDocument`] and then encoded twice:
//!
//! - [`encodings::GrayscaleEncoder`] draws every byte of every clause line as
//!   a gray pixel,
//! - [`encodings::ColorEncoder`] draws every literal as a color determined by
//!   its rank among the distinct literals of the document.
//!
//! Both rasters are square and filled row by row. Each can be written as a BMP
//! image ([`codec`]) and as a raw binary dump ([`dump`]), optionally after
//! resizing to a fixed resolution. [`pipeline::convert`] writes all of these
//! artifacts at once.
//!
//! ## Example
//!
//! ```
//! use cnf2img::{encodings::{Encode, GrayscaleEncoder}, instances::CnfDocument};
//!
//! let doc: CnfDocument = "c test\np cnf 2 1\n1 -2 0\n".parse().unwrap();
//! let raster = GrayscaleEncoder::new(&doc).encode();
//! assert_eq!(raster.width(), 3);
//! ```
//!
//! ## Crate Features
//!
//! - `compression`: Read bzip2, gzip and xz compressed DIMACS files,
//!   detected by the file extension.

#![warn(missing_docs)]

pub mod codec;
pub mod dump;
pub mod encodings;
pub mod instances;
pub mod pipeline;
pub mod raster;
pub mod types;

mod utils;
