//! # Fingerprint Module
//!
//! Reduces an image to a 256-bit perceptual fingerprint.
//!
//! ## How It Works
//! 1. Resample to 160x160 (nearest neighbour, colour)
//! 2. Convert to grayscale
//! 3. Blur (radius 3)
//! 4. Normalize contrast
//! 5. Equalize the histogram
//! 6. Resample to 16x16
//! 7. Threshold to black and white
//! 8. Pack the 16x16 grid into 32 bytes, one bit per dark pixel
//!
//! The stage order and both sizes are fixed: they are what makes two
//! independently recompressed copies of an image land on nearly the same bits.
//!
//! ## Example
//! ```rust,ignore
//! use image_dupe_finder::core::fingerprint::{fingerprint_file, PerceptualHash};
//!
//! let a = fingerprint_file(&path_a)?;
//! let b = fingerprint_file(&path_b)?;
//! println!("{} bits differ", a.diff_bits(&b));
//! ```

mod decode;
mod generator;
mod traits;

pub use decode::FastDecoder;
pub use generator::{
    fingerprint_bytes, fingerprint_file, fingerprint_image, pack_grid, reduce_to_grid, GRID_SIZE,
    INTERMEDIATE_SIZE,
};
pub use traits::PerceptualHash;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of bytes in a fingerprint
pub const FINGERPRINT_BYTES: usize = 32;

/// Number of bits in a fingerprint
pub const FINGERPRINT_BITS: u32 = (FINGERPRINT_BYTES * 8) as u32;

/// A 256-bit perceptual fingerprint.
///
/// Row `y` of the 16x16 grid occupies bytes `2y` and `2y + 1`; within a byte,
/// bit `7 - j` is column `j` of that half-row. A set bit is a dark pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint([u8; FINGERPRINT_BYTES]);

impl Fingerprint {
    /// Create a fingerprint from raw bytes
    pub fn from_bytes(bytes: [u8; FINGERPRINT_BYTES]) -> Self {
        Self(bytes)
    }

    /// Whether the grid cell at `(x, y)` is dark
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        let (byte, bit) = Self::locate(x, y);
        self.0[byte] & (1 << bit) != 0
    }

    /// Mark the grid cell at `(x, y)` as dark
    pub(crate) fn set(&mut self, x: u32, y: u32) {
        let (byte, bit) = Self::locate(x, y);
        self.0[byte] |= 1 << bit;
    }

    fn locate(x: u32, y: u32) -> (usize, u32) {
        debug_assert!(x < GRID_SIZE && y < GRID_SIZE);
        ((y * 2 + x / 8) as usize, 7 - x % 8)
    }
}

impl PerceptualHash for Fingerprint {
    fn diff_bits(&self, other: &Self) -> u32 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
