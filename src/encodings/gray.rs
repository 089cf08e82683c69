//! # Grayscale Encoding
//!
//! Every byte of a clause line becomes one gray pixel, followed by a carriage
//! return separator pixel after each clause.

use std::iter;

use super::Encode;
use crate::{instances::CnfDocument, raster::Gray};

/// The byte drawn after every clause
pub const LINE_SEPARATOR: u8 = 13;

/// Computes the gray level of a byte
///
/// The weights sum to one, but the floating point sum is truncated, which
/// yields `b - 1` for some bytes (e.g. `32`).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn gray_level(b: u8) -> u8 {
    let b = f64::from(b);
    (b * 0.3 + b * 0.59 + b * 0.11) as u8
}

/// Encodes the raw clause bytes of a document as gray pixels
#[derive(Debug, Clone, Copy)]
pub struct GrayscaleEncoder<'doc> {
    doc: &'doc CnfDocument,
}

impl<'doc> GrayscaleEncoder<'doc> {
    /// Creates an encoder for a document
    #[must_use]
    pub fn new(doc: &'doc CnfDocument) -> Self {
        Self { doc }
    }
}

impl Encode for GrayscaleEncoder<'_> {
    type Pixel = Gray;

    fn n_units(&self) -> usize {
        self.doc.total_byte_count() + self.doc.clauses().len()
    }

    fn units(&self) -> impl Iterator<Item = Gray> + '_ {
        self.doc
            .clauses()
            .iter()
            .flat_map(|cl| cl.raw().iter().copied().chain(iter::once(LINE_SEPARATOR)))
            .map(|b| Gray(gray_level(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::{gray_level, GrayscaleEncoder, LINE_SEPARATOR};
    use crate::{
        encodings::Encode,
        instances::CnfDocument,
        raster::{Gray, Pixel},
    };

    #[test]
    fn gray_level_truncates() {
        for b in 0..=255u8 {
            let x = f64::from(b);
            let expected = (x * 0.3 + x * 0.59 + x * 0.11).floor();
            assert_eq!(f64::from(gray_level(b)), expected, "b = {b}");
            assert!(gray_level(b) == b || gray_level(b) == b - 1);
        }
        assert_eq!(gray_level(32), 31);
        assert_eq!(gray_level(48), 48);
        assert_eq!(gray_level(85), 85);
        assert_eq!(gray_level(255), 255);
        assert_eq!(gray_level(LINE_SEPARATOR), 13);
    }

    #[test]
    fn small_document() {
        let doc: CnfDocument = "c test\np cnf 2 1\n1 -2 0\n".parse().unwrap();
        let enc = GrayscaleEncoder::new(&doc);
        assert_eq!(enc.n_units(), 7);
        let raster = enc.encode();
        assert_eq!(raster.width(), 3);
        assert_eq!(raster.height(), 3);
        assert_eq!(
            raster.pixels(),
            &[49, 31, 45, 50, 31, 48, 13, 0, 0].map(Gray)
        );
    }

    #[test]
    fn separator_per_clause() {
        let doc: CnfDocument = "p cnf 2 3\n1 0\n-2 0\n0\n".parse().unwrap();
        let enc = GrayscaleEncoder::new(&doc);
        assert_eq!(enc.n_units(), 3 + 4 + 1 + 3);
        let seps = enc.units().filter(|px| *px == Gray(13)).count();
        assert_eq!(seps, 3);
        let raster = enc.encode();
        assert_eq!(raster.width(), 4);
        assert!(raster.width() * raster.width() >= enc.n_units());
    }

    #[test]
    fn empty_document() {
        let doc: CnfDocument = "c nothing here\np cnf 0 0\n".parse().unwrap();
        let enc = GrayscaleEncoder::new(&doc);
        assert_eq!(enc.n_units(), 0);
        let raster = enc.encode();
        assert!(raster.is_empty());
        assert_eq!(raster.width(), 0);
    }

    #[test]
    fn deterministic() {
        let doc: CnfDocument = "p cnf 3 2\n1 -3 0\n2 3 -1 0\n".parse().unwrap();
        let enc = GrayscaleEncoder::new(&doc);
        assert_eq!(enc.encode(), enc.encode());
        assert_eq!(Gray::BYTES, 1);
    }
}
