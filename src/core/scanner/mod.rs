//! # Scanner Module
//!
//! Discovers candidate image files in directories.
//!
//! ## Default Extensions
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - GIF (.gif)
//!
//! Extensions are matched case-insensitively and can be replaced through
//! [`ScanConfig::extensions`].
//!
//! ## Ordering
//! Roots are visited in the order given and entries inside each root are
//! sorted by file name, so the same tree always enumerates the same way.
//! Clustering output depends on this order.
//!
//! ## Example
//! ```rust,ignore
//! use image_dupe_finder::core::scanner::{ImageScanner, ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(&["/Users/photos".into()])?;
//! ```

mod filter;
mod walker;

pub use filter::{parse_extensions, ImageFilter, DEFAULT_EXTENSIONS};
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use crate::events::EventSender;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A discovered image file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    /// Path to the file
    pub path: PathBuf,
    /// Decoder branch picked from the extension
    pub format: ImageFormat,
}

/// Image formats recognised by extension.
///
/// JPEG gets the fast decoder; everything else, `Unknown` included, is
/// sniffed from its content by the image crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            "gif" => ImageFormat::Gif,
            _ => ImageFormat::Unknown,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown)
    }
}

/// Result of a scan operation
#[derive(Debug)]
pub struct ScanResult {
    /// Discovered files, in enumeration order
    pub files: Vec<ImageFile>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Trait for image scanners
///
/// Implement this trait to create custom scanners (e.g., for testing).
pub trait ImageScanner: Send + Sync {
    /// Scan roots and return discovered files
    fn scan(&self, paths: &[PathBuf]) -> ScanResult;

    /// Scan with progress reporting via events
    fn scan_with_events(&self, paths: &[PathBuf], events: &EventSender) -> ScanResult;
}
