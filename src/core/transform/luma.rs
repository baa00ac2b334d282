//! Colour to luminance conversion using ITU-R BT.709 weights.

use image::{GrayImage, Luma, Rgba, RgbaImage};

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;

/// Convert a colour image to single-channel luminance of the same size.
///
/// Channels are premultiplied by alpha first, so transparent areas read as
/// black.
pub fn grayscale(image: &RgbaImage) -> GrayImage {
    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        Luma([luminance(image.get_pixel(x, y))])
    })
}

fn luminance(pixel: &Rgba<u8>) -> u8 {
    let [r, g, b, a] = pixel.0;
    let alpha = f64::from(a) / 255.0;
    let y = RED_WEIGHT * f64::from(r) + GREEN_WEIGHT * f64::from(g) + BLUE_WEIGHT * f64::from(b);
    (y * alpha).round().clamp(0.0, 255.0) as u8
}
