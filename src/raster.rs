//! # Rasters and Their Layout
//!
//! A [`Raster`] is a row-major grid of pixels with the origin in the top left
//! corner. Rasters produced by the encoders are square and filled through a
//! [`Layout`], which fixes the width for a number of units and the wrapping
//! policy of the write [`Cursor`]. Cells that are never written keep the
//! default (black) value of their pixel type.

use std::{fmt, io};

/// Pixel types that can be stored in a [`Raster`]
///
/// The default value of a pixel type is the background (black) value.
pub trait Pixel: Copy + Default + PartialEq + fmt::Debug {
    /// The pixel type of the image codec this pixel converts to
    type Image: image::Pixel<Subpixel = u8> + image::PixelWithColorType + 'static;

    /// The number of bytes one pixel occupies in a binary dump
    const BYTES: usize;

    /// Writes the bytes of this pixel as a unit of a document dump
    ///
    /// # Errors
    ///
    /// If writing fails.
    fn write_unit<W: io::Write + ?Sized>(self, writer: &mut W) -> io::Result<()>;

    /// Writes the bytes re-derived from this pixel when dumping a rendered raster
    ///
    /// # Errors
    ///
    /// If writing fails.
    fn write_rendered<W: io::Write + ?Sized>(self, writer: &mut W) -> io::Result<()>;

    /// Converts the pixel to the codec pixel type
    fn to_image(self) -> Self::Image;

    /// Converts a codec pixel to this pixel type
    fn from_image(px: Self::Image) -> Self;

    /// Converts a decoded image of any color type to the codec pixel type
    fn convert_image(img: image::DynamicImage) -> image::ImageBuffer<Self::Image, Vec<u8>>;
}

/// A grayscale pixel holding a single luminance value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Gray(pub u8);

/// A color pixel holding red, green and blue channels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    /// Splits the lower 24 bits of a value into red, green and blue
    #[must_use]
    pub fn from_u24(color: u32) -> Self {
        Rgb([
            ((color >> 16) & 0xFF) as u8,
            ((color >> 8) & 0xFF) as u8,
            (color & 0xFF) as u8,
        ])
    }
}

impl Pixel for Gray {
    type Image = image::Luma<u8>;

    const BYTES: usize = 1;

    fn write_unit<W: io::Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&[self.0])
    }

    fn write_rendered<W: io::Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&[crate::dump::rendered_luma(self.0, self.0, self.0)])
    }

    fn to_image(self) -> Self::Image {
        image::Luma([self.0])
    }

    fn from_image(px: Self::Image) -> Self {
        Gray(px.0[0])
    }

    fn convert_image(img: image::DynamicImage) -> image::GrayImage {
        img.into_luma8()
    }
}

impl Pixel for Rgb {
    type Image = image::Rgb<u8>;

    const BYTES: usize = 3;

    fn write_unit<W: io::Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.0)
    }

    fn write_rendered<W: io::Write + ?Sized>(self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.0)
    }

    fn to_image(self) -> Self::Image {
        image::Rgb(self.0)
    }

    fn from_image(px: Self::Image) -> Self {
        Rgb(px.0)
    }

    fn convert_image(img: image::DynamicImage) -> image::RgbImage {
        img.into_rgb8()
    }
}

/// Computes `ceil(sqrt(n))` exactly for any `n`
#[must_use]
pub fn ceil_sqrt(n: usize) -> usize {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut root = (n as f64).sqrt().ceil() as usize;
    // correct for the rounding of large values
    while root.checked_mul(root).is_some_and(|sq| sq < n) {
        root += 1;
    }
    while root > 0 && (root - 1) * (root - 1) >= n {
        root -= 1;
    }
    root
}

/// The square layout for a given number of units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    width: usize,
    n_units: usize,
}

impl Layout {
    /// Computes the layout for `n_units` units, with width `ceil(sqrt(n_units))`
    #[must_use]
    pub fn for_units(n_units: usize) -> Self {
        Layout {
            width: ceil_sqrt(n_units),
            n_units,
        }
    }

    /// The side length of the raster
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of units the layout was computed for
    #[must_use]
    pub fn n_units(&self) -> usize {
        self.n_units
    }

    /// Gets a write cursor at the origin
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        Cursor {
            col: 0,
            row: 0,
            width: self.width,
        }
    }
}

/// A write position in a layout
///
/// Every write advances the column. When the column reaches the width it is
/// reset to zero and the row is incremented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    col: usize,
    row: usize,
    width: usize,
}

impl Cursor {
    /// The current `(col, row)` position
    #[must_use]
    pub fn position(&self) -> (usize, usize) {
        (self.col, self.row)
    }

    /// Moves the cursor to the next cell
    pub fn advance(&mut self) {
        self.col += 1;
        if self.col == self.width {
            self.col = 0;
            self.row += 1;
        }
    }
}

/// A row-major grid of pixels
#[derive(Clone, PartialEq, Eq)]
pub struct Raster<P> {
    width: usize,
    height: usize,
    cells: Vec<P>,
}

impl<P: Pixel> Raster<P> {
    /// Creates a raster with all cells set to the background value
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Raster {
            width,
            height,
            cells: vec![P::default(); width * height],
        }
    }

    /// Fills a square raster of the layout's width with the given units,
    /// moving a [`Cursor`] over it
    ///
    /// Units beyond the capacity of the raster are ignored; this cannot happen
    /// if the layout was computed for the number of units.
    pub fn from_layout<I: IntoIterator<Item = P>>(layout: Layout, units: I) -> Self {
        let mut raster = Raster::new(layout.width(), layout.width());
        let mut cursor = layout.cursor();
        for px in units {
            let (col, row) = cursor.position();
            debug_assert!(
                row < raster.height,
                "more units than the layout was computed for"
            );
            if row >= raster.height {
                break;
            }
            raster.cells[row * raster.width + col] = px;
            cursor.advance();
        }
        raster
    }

    /// Creates a raster from row-major cells
    ///
    /// Returns `None` if the number of cells does not match the dimensions.
    #[must_use]
    pub fn from_cells(width: usize, height: usize, cells: Vec<P>) -> Option<Self> {
        if cells.len() != width * height {
            return None;
        }
        Some(Raster {
            width,
            height,
            cells,
        })
    }

    /// The number of columns
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// The number of rows
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Checks if the raster has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Gets the pixel at a position, `None` if the position is out of bounds
    #[must_use]
    pub fn get(&self, col: usize, row: usize) -> Option<P> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// The pixels in row-major order, top to bottom and left to right
    #[must_use]
    pub fn pixels(&self) -> &[P] {
        &self.cells
    }
}

impl<P: fmt::Debug> fmt::Debug for Raster<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
