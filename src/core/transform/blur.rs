//! Box blur over a 7x7 window.
//!
//! Close to a gaussian blur with a high sigma, at a fraction of the cost.

use image::{GrayImage, Luma};
use std::ops::Range;

/// Pixels on each side of the centre included in the window
pub const BLUR_RADIUS: u32 = 3;

/// Replace each pixel with the integer mean of its in-bounds neighbours.
///
/// Neighbours outside the image are left out of both the sum and the count,
/// so border pixels are averaged over a smaller window rather than padded.
pub fn blur(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();

    GrayImage::from_fn(width, height, |x, y| {
        let mut sum = 0u32;
        let mut count = 0u32;
        for ny in window(y, height) {
            for nx in window(x, width) {
                sum += u32::from(image.get_pixel(nx, ny)[0]);
                count += 1;
            }
        }
        Luma([(sum / count) as u8])
    })
}

fn window(centre: u32, len: u32) -> Range<u32> {
    centre.saturating_sub(BLUR_RADIUS)..(centre + BLUR_RADIUS + 1).min(len)
}
