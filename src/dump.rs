//! # Raw Binary Dumps
//!
//! Two kinds of flat byte streams are produced:
//!
//! - [`write_document`] linearizes the units of an encoder directly, without
//!   any notion of rows: one byte per gray unit, three bytes (R, G, B) per
//!   color unit.
//! - [`write_raster`] walks an already rendered (and possibly resized) raster
//!   row by row. Gray pixels are re-derived with [`rendered_luma`], color
//!   pixels are written channel by channel.
//!
//! Note that [`rendered_luma`] uses the perceptual weights
//! `0.2989, 0.5870, 0.1140`, not the `0.3, 0.59, 0.11` weights of
//! [`gray_level`](crate::encodings::gray::gray_level). A gray pixel of value
//! `85` is therefore dumped as `84`. This is a known inconsistency between the
//! two dumps.

use std::io;

use crate::{
    encodings::Encode,
    raster::{Pixel, Raster},
    utils::unreachable_err,
};

/// The luma weights of red, green and blue used when dumping rendered rasters
pub const RENDERED_LUMA_WEIGHTS: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Derives the truncated luminance of a rendered pixel
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rendered_luma(r: u8, g: u8, b: u8) -> u8 {
    let [wr, wg, wb] = RENDERED_LUMA_WEIGHTS;
    (wr * f64::from(r) + wg * f64::from(g) + wb * f64::from(b)) as u8
}

/// Writes the units of an encoder as a flat byte stream
///
/// Returns the number of units written.
///
/// # Errors
///
/// If writing fails.
pub fn write_document<E, W>(encoder: &E, writer: &mut W) -> io::Result<usize>
where
    E: Encode,
    W: io::Write + ?Sized,
{
    let mut n_units = 0;
    for px in encoder.units() {
        px.write_unit(writer)?;
        n_units += 1;
    }
    Ok(n_units)
}

/// Collects the document dump of an encoder in memory
#[must_use]
pub fn document_bytes<E: Encode>(encoder: &E) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoder.n_units() * E::Pixel::BYTES);
    unreachable_err!(write_document(encoder, &mut buf));
    buf
}

/// Writes a rendered raster row-major as a flat byte stream
///
/// # Errors
///
/// If writing fails.
pub fn write_raster<P, W>(raster: &Raster<P>, writer: &mut W) -> io::Result<()>
where
    P: Pixel,
    W: io::Write + ?Sized,
{
    raster
        .pixels()
        .iter()
        .try_for_each(|px| px.write_rendered(writer))
}

/// Collects the dump of a rendered raster in memory
#[must_use]
pub fn raster_bytes<P: Pixel>(raster: &Raster<P>) -> Vec<u8> {
    let mut buf = Vec::with_capacity(raster.pixels().len() * P::BYTES);
    unreachable_err!(write_raster(raster, &mut buf));
    buf
}

#[cfg(test)]
mod tests {
    use super::{document_bytes, raster_bytes, rendered_luma, write_document, write_raster};
    use crate::{
        encodings::{gray::gray_level, ColorEncoder, Encode, GrayscaleEncoder},
        instances::CnfDocument,
        raster::{Gray, Raster, Rgb},
    };

    const DOC: &str = "c test\np cnf 2 1\n1 -2 0\n";

    #[test]
    fn gray_document_dump() {
        let doc: CnfDocument = DOC.parse().unwrap();
        let bytes = document_bytes(&GrayscaleEncoder::new(&doc));
        assert_eq!(bytes, vec![49, 31, 45, 50, 31, 48, 13]);
    }

    #[test]
    fn color_document_dump() {
        let doc: CnfDocument = DOC.parse().unwrap();
        let bytes = document_bytes(&ColorEncoder::new(&doc));
        assert_eq!(bytes, vec![0xAA, 0xAA, 0xAA, 0x55, 0x55, 0x55, 0, 0, 0]);
    }

    #[test]
    fn document_dump_matches_unit_count() {
        let doc: CnfDocument = "c units\np cnf 6 4\n1 -2 0\n-3 4 5 -6 0\n2 0\n-1 6\n"
            .parse()
            .unwrap();

        let gray = GrayscaleEncoder::new(&doc);
        let mut buf = vec![];
        let n_units = write_document(&gray, &mut buf).unwrap();
        assert_eq!(n_units, gray.n_units());
        assert_eq!(buf.len(), gray.n_units());
        assert!(gray.layout().width().pow(2) >= n_units);

        let color = ColorEncoder::new(&doc);
        let mut buf = vec![];
        let n_units = write_document(&color, &mut buf).unwrap();
        assert_eq!(n_units, color.n_units());
        assert_eq!(buf.len(), 3 * color.n_units());
    }

    #[test]
    fn in_memory_dumps_match_writers() {
        let doc: CnfDocument = "p cnf 4 2\n1 -2 0\n3 -4 2 0\n".parse().unwrap();
        let enc = ColorEncoder::new(&doc);
        let mut buf = vec![];
        write_document(&enc, &mut buf).unwrap();
        assert_eq!(document_bytes(&enc), buf);

        let raster = GrayscaleEncoder::new(&doc).encode();
        let mut buf = vec![];
        write_raster(&raster, &mut buf).unwrap();
        assert_eq!(raster_bytes(&raster), buf);
    }

    #[test]
    fn document_dump_ignores_layout() {
        let doc: CnfDocument = DOC.parse().unwrap();
        let enc = GrayscaleEncoder::new(&doc);
        // the raster has two trailing background cells, the dump does not
        assert_eq!(enc.encode().pixels().len(), 9);
        assert_eq!(document_bytes(&enc).len(), 7);
    }

    #[test]
    fn rendered_gray_uses_luma_weights() {
        let raster = Raster::from_cells(2, 2, vec![Gray(85), Gray(0), Gray(255), Gray(13)]).unwrap();
        assert_eq!(raster_bytes(&raster), vec![84, 0, 254, 12]);
    }

    #[test]
    fn rendered_luma_differs_from_encoding() {
        assert_eq!(gray_level(85), 85);
        assert_eq!(rendered_luma(85, 85, 85), 84);
        assert_ne!(gray_level(85), rendered_luma(85, 85, 85));
        assert_eq!(rendered_luma(0, 0, 0), 0);
        assert_eq!(rendered_luma(255, 0, 0), 76);
    }

    #[test]
    fn rendered_color_keeps_channels() {
        let raster =
            Raster::from_cells(1, 2, vec![Rgb([1, 2, 3]), Rgb([0xAA, 0xBB, 0xCC])]).unwrap();
        assert_eq!(raster_bytes(&raster), vec![1, 2, 3, 0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn rendered_raster_is_row_major() {
        let doc: CnfDocument = "p cnf 3 1\n1 2 3 0\n".parse().unwrap();
        let raster = ColorEncoder::new(&doc).encode();
        assert_eq!(raster.width(), 2);
        let bytes = raster_bytes(&raster);
        assert_eq!(bytes.len(), 4 * 3);
        assert_eq!(&bytes[9..], &[0, 0, 0]);
        assert_eq!(&bytes[..3], &[0x3F, 0xFF, 0xFF]);
    }
}
