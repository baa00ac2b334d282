//! Level mapping operations: contrast stretch, histogram equalization and
//! binarization. Each builds a 256-entry table and applies it to every pixel.

use super::map_levels;
use image::GrayImage;

/// Grayscale split point for `threshold`
pub const MIDPOINT: u8 = 128;

const FLOOR_FACTOR: f64 = 0.02;
const CEILING_FACTOR: f64 = 0.99;

/// Stretch contrast from `[min, max]` to `[0.02 * min, 0.99 * max]`.
///
/// A flat image (`min == max`) has no range to stretch and is returned as is.
pub fn normalize(image: &GrayImage) -> GrayImage {
    let Some((min, max)) = level_range(image) else {
        return image.clone();
    };
    if min == max {
        return image.clone();
    }

    let floor = FLOOR_FACTOR * f64::from(min);
    let ceiling = CEILING_FACTOR * f64::from(max);
    let scale = (ceiling - floor) / f64::from(max - min);

    let table: [u8; 256] = std::array::from_fn(|level| {
        let stretched = (level as f64 - f64::from(min)) * scale + floor;
        to_level(stretched)
    });
    map_levels(image, &table)
}

/// Histogram equalization.
///
/// Level `i` maps to `round((cdf[i] - cdf_min) / (total - cdf_min) * 255)`
/// where `cdf_min` is the smallest non-zero cumulative count. When only one
/// level is present every pixel maps to 0.
pub fn equalize(image: &GrayImage) -> GrayImage {
    let mut histogram = [0u64; 256];
    for pixel in image.pixels() {
        histogram[pixel[0] as usize] += 1;
    }

    let mut cdf = [0u64; 256];
    let mut running = 0u64;
    for (level, count) in histogram.iter().enumerate() {
        running += count;
        cdf[level] = running;
    }

    let Some(cdf_min) = cdf.iter().copied().find(|&c| c > 0) else {
        return image.clone();
    };
    let span = running - cdf_min;

    let table: [u8; 256] = std::array::from_fn(|level| {
        if span == 0 {
            return 0;
        }
        let scaled = (cdf[level] as f64 - cdf_min as f64) / span as f64 * 255.0;
        to_level(scaled)
    });
    map_levels(image, &table)
}

/// Binarize: below `MIDPOINT` becomes 0, everything else 255.
pub fn threshold(image: &GrayImage) -> GrayImage {
    let table: [u8; 256] =
        std::array::from_fn(|level| if level < MIDPOINT as usize { 0 } else { 255 });
    map_levels(image, &table)
}

fn level_range(image: &GrayImage) -> Option<(u8, u8)> {
    image.pixels().map(|p| p[0]).fold(None, |range, level| match range {
        None => Some((level, level)),
        Some((min, max)) => Some((min.min(level), max.max(level))),
    })
}

fn to_level(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::gray_from_rows;
    use image::Luma;

    fn levels(image: &GrayImage) -> Vec<u8> {
        image.pixels().map(|p| p[0]).collect()
    }

    #[test]
    fn normalize_stretches_to_new_range() {
        let image = gray_from_rows(&[&[10, 60, 110]]);
        let normalized = normalize(&image);

        // floor 0.2, ceiling 108.9, scale 1.087
        assert_eq!(levels(&normalized), vec![0, 55, 109]);
    }

    #[test]
    fn normalize_full_range_scales_ceiling() {
        let image = gray_from_rows(&[&[0, 255]]);
        assert_eq!(levels(&normalize(&image)), vec![0, 252]);
    }

    #[test]
    fn normalize_flat_image_is_unchanged() {
        let image = GrayImage::from_pixel(4, 4, Luma([77]));
        assert_eq!(normalize(&image), image);
    }

    #[test]
    fn equalize_two_levels_spread_to_extremes() {
        let image = gray_from_rows(&[&[50, 50, 50, 200]]);
        assert_eq!(levels(&equalize(&image)), vec![0, 0, 0, 255]);
    }

    #[test]
    fn equalize_uses_cumulative_counts() {
        let image = gray_from_rows(&[&[0, 100, 200, 200]]);
        // cdf = 1, 2, 4; cdf_min = 1; (2 - 1) / 3 * 255 = 85
        assert_eq!(levels(&equalize(&image)), vec![0, 85, 255, 255]);
    }

    #[test]
    fn equalize_single_level_maps_to_zero() {
        let image = GrayImage::from_pixel(3, 3, Luma([180]));
        assert!(equalize(&image).pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn threshold_splits_at_midpoint() {
        let image = gray_from_rows(&[&[0, 127, 128, 255]]);
        assert_eq!(levels(&threshold(&image)), vec![0, 0, 255, 255]);
    }

    #[test]
    fn operations_keep_dimensions() {
        let image = GrayImage::from_fn(9, 5, |x, y| Luma([(x * 20 + y) as u8]));
        assert_eq!(normalize(&image).dimensions(), (9, 5));
        assert_eq!(equalize(&image).dimensions(), (9, 5));
        assert_eq!(threshold(&image).dimensions(), (9, 5));
    }
}
