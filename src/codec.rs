//! # Image Codec Glue
//!
//! Conversion between [`Raster`]s and the buffers of the `image` crate, BMP
//! encoding and decoding, and resizing. Interpolation is entirely left to
//! [`image::imageops::resize`].

use std::io;

use image::{codecs::bmp::BmpEncoder, imageops::FilterType, ImageBuffer, ImageFormat};

use crate::{
    raster::{Pixel, Raster},
    utils::unreachable_none,
};

/// Errors from the image codec
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The raster has no cells and cannot be stored as an image
    #[error("cannot encode a raster with zero area")]
    Empty,
    /// The raster dimensions do not fit the codec
    #[error("raster of size {0}x{1} is too large for the image codec")]
    TooLarge(usize, usize),
    /// Resizing to a zero dimension was requested
    #[error("cannot resize to {0}x{1}")]
    InvalidTarget(u32, u32),
    /// The codec failed
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Converts a raster to an image buffer
///
/// # Errors
///
/// If the raster dimensions do not fit into `u32`.
pub fn to_image<P: Pixel>(raster: &Raster<P>) -> Result<ImageBuffer<P::Image, Vec<u8>>, Error> {
    let (Ok(width), Ok(height)) = (u32::try_from(raster.width()), u32::try_from(raster.height()))
    else {
        return Err(Error::TooLarge(raster.width(), raster.height()));
    };
    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        raster
            .get(x as usize, y as usize)
            .unwrap_or_default()
            .to_image()
    }))
}

/// Converts an image buffer to a raster
#[must_use]
pub fn from_image<P: Pixel>(img: &ImageBuffer<P::Image, Vec<u8>>) -> Raster<P> {
    let cells = img.pixels().map(|px| P::from_image(*px)).collect();
    unreachable_none!(Raster::from_cells(
        img.width() as usize,
        img.height() as usize,
        cells
    ))
}

/// Encodes a raster as a BMP image
///
/// # Errors
///
/// If the raster is empty or encoding fails.
pub fn write_bmp<P, W>(raster: &Raster<P>, writer: &mut W) -> Result<(), Error>
where
    P: Pixel,
    W: io::Write,
{
    if raster.is_empty() {
        return Err(Error::Empty);
    }
    to_image(raster)?.write_with_encoder(BmpEncoder::new(writer))?;
    Ok(())
}

/// Decodes a BMP image into a raster, converting the color type if needed
///
/// # Errors
///
/// If decoding fails.
pub fn read_bmp<P, R>(reader: R) -> Result<Raster<P>, Error>
where
    P: Pixel,
    R: io::BufRead + io::Seek,
{
    let img = image::load(reader, ImageFormat::Bmp)?;
    Ok(from_image(&P::convert_image(img)))
}

/// Resizes a raster to the given dimensions
///
/// # Errors
///
/// If the raster is empty, a target dimension is zero, or the raster is too
/// large for the codec.
pub fn resize<P: Pixel>(
    raster: &Raster<P>,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<Raster<P>, Error> {
    if raster.is_empty() {
        return Err(Error::Empty);
    }
    if width == 0 || height == 0 {
        return Err(Error::InvalidTarget(width, height));
    }
    let img = to_image(raster)?;
    Ok(from_image(&image::imageops::resize(
        &img, width, height, filter,
    )))
}
