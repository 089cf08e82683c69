//! # Raster Encodings of CNF Documents
//!
//! The two ways of drawing a [`CnfDocument`](crate::instances::CnfDocument):
//! [`GrayscaleEncoder`] draws the bytes of every clause line and
//! [`ColorEncoder`] draws the literals of every clause. Both emit one trailing
//! separator unit per clause and share the [`Layout`] wrap policy.

use crate::raster::{Layout, Pixel, Raster};

pub mod color;
pub mod gray;

pub use color::ColorEncoder;
pub use gray::GrayscaleEncoder;

/// Trait for encoders turning a document into a stream of pixel units
pub trait Encode {
    /// The pixel type of the units
    type Pixel: Pixel;

    /// Gets the number of units the document is encoded into, including the
    /// per-clause separators
    fn n_units(&self) -> usize;

    /// Gets the units in document order
    fn units(&self) -> impl Iterator<Item = Self::Pixel> + '_;

    /// Gets the square layout for the units of the document
    fn layout(&self) -> Layout {
        Layout::for_units(self.n_units())
    }

    /// Draws the units onto a square raster
    fn encode(&self) -> Raster<Self::Pixel> {
        let layout = self.layout();
        log::debug!(
            "laying out {} units on a {}x{} raster",
            layout.n_units(),
            layout.width(),
            layout.width()
        );
        Raster::from_layout(layout, self.units())
    }
}
