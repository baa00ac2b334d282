//! The fixed fingerprint pipeline.

use super::decode::FastDecoder;
use super::Fingerprint;
use crate::core::transform::{blur, equalize, grayscale, normalize, resample, threshold, MIDPOINT};
use crate::error::FingerprintError;
use image::{DynamicImage, GenericImageView, GrayImage};
use std::path::{Path, PathBuf};

/// Side length of the intermediate raster the filters run on
pub const INTERMEDIATE_SIZE: u32 = 160;

/// Side length of the final binary grid
pub const GRID_SIZE: u32 = 16;

/// Fingerprint an already-decoded image.
pub fn fingerprint_image(image: &DynamicImage) -> Result<Fingerprint, FingerprintError> {
    ensure_pixels(image, Path::new("<memory>"))?;
    Ok(pack_grid(&reduce_to_grid(image)))
}

/// Read, decode and fingerprint the image at `path`.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, FingerprintError> {
    let image = FastDecoder::decode(path)?;
    ensure_pixels(&image, path)?;
    Ok(pack_grid(&reduce_to_grid(&image)))
}

/// Decode and fingerprint an encoded image held in memory.
pub fn fingerprint_bytes(bytes: &[u8]) -> Result<Fingerprint, FingerprintError> {
    let image = FastDecoder::decode_bytes(bytes)?;
    ensure_pixels(&image, Path::new("<memory>"))?;
    Ok(pack_grid(&reduce_to_grid(&image)))
}

/// Run stages 1-7 and return the thresholded 16x16 grid.
///
/// # Panics
/// If the image has zero width or height.
pub fn reduce_to_grid(image: &DynamicImage) -> GrayImage {
    let colour = resample(image, INTERMEDIATE_SIZE, INTERMEDIATE_SIZE);
    let gray = grayscale(&colour);
    let blurred = blur(&gray);
    let normalized = normalize(&blurred);
    let equalized = equalize(&normalized);
    let grid = resample(&equalized, GRID_SIZE, GRID_SIZE);
    threshold(&grid)
}

/// Pack a 16x16 grid into a fingerprint; dark cells become set bits.
pub fn pack_grid(grid: &GrayImage) -> Fingerprint {
    assert_eq!(
        grid.dimensions(),
        (GRID_SIZE, GRID_SIZE),
        "fingerprint grid must be {}x{}",
        GRID_SIZE,
        GRID_SIZE
    );

    let mut fingerprint = Fingerprint::default();
    for (x, y, pixel) in grid.enumerate_pixels() {
        if pixel[0] < MIDPOINT {
            fingerprint.set(x, y);
        }
    }
    fingerprint
}

fn ensure_pixels(image: &DynamicImage, path: &Path) -> Result<(), FingerprintError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(FingerprintError::EmptyImage {
            path: PathBuf::from(path),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fingerprint::{PerceptualHash, FINGERPRINT_BYTES};
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use std::io::Cursor;

    fn half_dark(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, _| {
            if x < width / 2 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        DynamicImage::ImageRgb8(img)
    }

    fn textured(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let v = ((x * 31 + y * 17) ^ (x * y)) % 256;
            Rgb([v as u8, (255 - v) as u8, (v / 2) as u8])
        });
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let image = textured(300, 200);
        let first = fingerprint_image(&image).unwrap();
        let second = fingerprint_image(&image).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.diff_bits(&second), 0);
    }

    #[test]
    fn dark_left_half_sets_left_bytes() {
        let fp = fingerprint_image(&half_dark(160, 160)).unwrap();
        let bytes = fp.as_bytes();

        for y in 0..GRID_SIZE as usize {
            assert_eq!(bytes[2 * y], 0xFF, "row {}", y);
            // Column 8 sits on the blurred edge; columns 9-15 are white
            assert_eq!(bytes[2 * y + 1] & 0x7F, 0x00, "row {}", y);
        }
    }

    #[test]
    fn flat_images_are_all_dark() {
        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 40, Rgb([255, 255, 255])));
        let fp = fingerprint_image(&white).unwrap();
        assert_eq!(fp.as_bytes(), &[0xFF; FINGERPRINT_BYTES]);
    }

    #[test]
    fn scaled_copy_matches() {
        let small = half_dark(80, 80);
        let large = half_dark(640, 640);

        let a = fingerprint_image(&small).unwrap();
        let b = fingerprint_image(&large).unwrap();
        assert!(a.diff_bits(&b) <= 16, "distance {}", a.diff_bits(&b));
    }

    #[test]
    fn grayscale_input_is_accepted() {
        let gray = GrayImage::from_fn(64, 48, |x, _| Luma([if x < 20 { 10 } else { 240 }]));
        let fp = fingerprint_image(&DynamicImage::ImageLuma8(gray)).unwrap();
        assert!(fp.is_set(0, 0));
        assert!(!fp.is_set(15, 0));
    }

    #[test]
    fn empty_image_is_rejected() {
        let empty = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        let result = fingerprint_image(&empty);
        assert!(matches!(result, Err(FingerprintError::EmptyImage { .. })));
    }

    #[test]
    fn pack_grid_sets_bits_for_dark_cells() {
        let mut grid = GrayImage::from_pixel(GRID_SIZE, GRID_SIZE, Luma([255]));
        grid.put_pixel(0, 0, Luma([0]));
        grid.put_pixel(7, 0, Luma([0]));
        grid.put_pixel(9, 2, Luma([0]));

        let fp = pack_grid(&grid);
        let bytes = fp.as_bytes();
        assert_eq!(bytes[0], 0x81);
        assert_eq!(bytes[5], 0x40);
        assert_eq!(bytes.iter().map(|b| b.count_ones()).sum::<u32>(), 3);
    }

    #[test]
    fn fingerprint_bytes_decodes_png() {
        let image = textured(120, 90);
        let mut encoded = Cursor::new(Vec::new());
        image
            .write_to(&mut encoded, image::ImageFormat::Png)
            .unwrap();

        let from_bytes = fingerprint_bytes(encoded.get_ref()).unwrap();
        let direct = fingerprint_image(&image).unwrap();
        assert_eq!(from_bytes, direct);
    }

    #[test]
    fn fingerprint_bytes_rejects_garbage() {
        let result = fingerprint_bytes(b"definitely not an image");
        assert!(matches!(result, Err(FingerprintError::Decode { .. })));
    }

    #[test]
    fn fingerprint_file_reports_missing_file() {
        let result = fingerprint_file(Path::new("/nonexistent/photo-12345.png"));
        assert!(matches!(result, Err(FingerprintError::Io { .. })));
    }
}
