//! # Color Encoding
//!
//! Every literal becomes one color pixel, followed by a black separator pixel
//! after each clause. The distinct literals of the document are sorted in
//! ascending order and the literal of rank `r` (1-based) is drawn as
//! `(0xFFFFFF / (n_distinct + 1)) * r`, which spreads the colors evenly over
//! the 24 bit range.

use rustc_hash::FxHashMap;

use super::Encode;
use crate::{instances::CnfDocument, raster::Rgb, utils::unreachable_none};

/// The range of colors that literal values are spread over
pub const COLOR_SPAN: u32 = 0x00FF_FFFF;

/// Encodes the literals of a document as color pixels
#[derive(Debug, Clone)]
pub struct ColorEncoder<'doc> {
    doc: &'doc CnfDocument,
    ranks: FxHashMap<i32, u32>,
    step: u32,
}

impl<'doc> ColorEncoder<'doc> {
    /// Creates an encoder for a document, ranking its distinct literals
    #[must_use]
    pub fn new(doc: &'doc CnfDocument) -> Self {
        let distinct = doc.sorted_literals();
        let divisor = distinct.len() as u64 + 1;
        #[allow(clippy::cast_possible_truncation)]
        let step = (u64::from(COLOR_SPAN) / divisor) as u32;
        let ranks = distinct
            .into_iter()
            .zip(1u32..)
            .collect::<FxHashMap<_, _>>();
        Self { doc, ranks, step }
    }

    /// Gets the 1-based rank of a literal among the sorted distinct literals
    /// of the document
    #[must_use]
    pub fn rank(&self, lit: i32) -> Option<u32> {
        self.ranks.get(&lit).copied()
    }

    /// Gets the color a literal is drawn with
    #[must_use]
    pub fn color(&self, lit: i32) -> Option<Rgb> {
        self.rank(lit)
            .map(|rank| Rgb::from_u24(self.step * rank))
    }
}

impl Encode for ColorEncoder<'_> {
    type Pixel = Rgb;

    fn n_units(&self) -> usize {
        self.doc.clauses().iter().map(|cl| cl.len() + 1).sum()
    }

    fn units(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.doc.clauses().iter().flat_map(move |cl| {
            cl.lits()
                .iter()
                .map(move |&lit| unreachable_none!(self.color(lit)))
                .chain(std::iter::once(Rgb::default()))
        })
    }
}
