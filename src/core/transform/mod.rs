//! # Transform Module
//!
//! Pure image-to-image operations used to reduce a photo to a fingerprint.
//!
//! Every operation borrows its input and returns a new raster; nothing is
//! modified in place.
//!
//! ## Operations
//! | Operation   | Input                 | Output                 |
//! |-------------|-----------------------|------------------------|
//! | `resample`  | any `GenericImageView`| same pixel type, NxM   |
//! | `grayscale` | `RgbaImage`           | `GrayImage`            |
//! | `blur`      | `GrayImage`           | `GrayImage`            |
//! | `normalize` | `GrayImage`           | `GrayImage`            |
//! | `equalize`  | `GrayImage`           | `GrayImage`            |
//! | `threshold` | `GrayImage`           | `GrayImage` (0 or 255) |
//!
//! Colour and grayscale inputs are separate types, so an operation can never
//! be handed a raster of the wrong colour model.

mod blur;
mod levels;
mod luma;
mod resample;

pub use blur::{blur, BLUR_RADIUS};
pub use levels::{equalize, normalize, threshold, MIDPOINT};
pub use luma::grayscale;
pub use resample::resample;

use image::{GrayImage, Luma};

/// Maps every pixel through a 256-entry level table.
fn map_levels(image: &GrayImage, table: &[u8; 256]) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([table[image.get_pixel(x, y)[0] as usize]])
    })
}

#[cfg(test)]
pub(crate) fn gray_from_rows(rows: &[&[u8]]) -> GrayImage {
    let height = rows.len() as u32;
    let width = rows.first().map(|r| r.len()).unwrap_or(0) as u32;
    GrayImage::from_fn(width, height, |x, y| Luma([rows[y as usize][x as usize]]))
}
