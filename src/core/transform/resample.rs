//! Nearest-neighbour resampling.
//!
//! Only existing pixel values are copied, never interpolated, so a resized
//! copy of an image contains no colours the original did not have.

use image::{GenericImageView, ImageBuffer, Pixel};

/// Resample `image` to exactly `cols` x `rows`.
///
/// Destination pixel `(x, y)` copies source pixel
/// `(round(x * width / cols), round(y * height / rows))`, clamped to the last
/// valid column/row. Works for colour (`DynamicImage`, `RgbaImage`) and
/// grayscale (`GrayImage`) sources alike.
///
/// # Panics
/// If the source has zero width or height.
pub fn resample<I>(
    image: &I,
    cols: u32,
    rows: u32,
) -> ImageBuffer<I::Pixel, Vec<<I::Pixel as Pixel>::Subpixel>>
where
    I: GenericImageView,
{
    let (width, height) = image.dimensions();
    assert!(
        width > 0 && height > 0,
        "cannot resample an empty {}x{} image",
        width,
        height
    );

    ImageBuffer::from_fn(cols, rows, |x, y| {
        image.get_pixel(source_coord(x, width, cols), source_coord(y, height, rows))
    })
}

fn source_coord(dst: u32, src_len: u32, dst_len: u32) -> u32 {
    let scaled = (u64::from(dst) * u64::from(src_len)) as f64 / f64::from(dst_len);
    (scaled.round() as u32).min(src_len - 1)
}
