//! # Error Module
//!
//! Error types for the image duplicate finder.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, values, what went wrong
//! - **Recoverable inputs** - a file that fails to decode is reported,
//!   not fatal; the caller decides whether to skip it

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum DupeFinderError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Fingerprint error: {0}")]
    Fingerprint(#[from] FingerprintError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors that occur while discovering image files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Path not found: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that prevent an image from being fingerprinted.
///
/// These are input failures: the file could not be read or decoded.
#[derive(Error, Debug)]
pub enum FingerprintError {
    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Image has no pixels: {path}")]
    EmptyImage { path: PathBuf },
}

impl FingerprintError {
    /// Path of the image that failed
    pub fn path(&self) -> &PathBuf {
        match self {
            FingerprintError::Io { path, .. } => path,
            FingerprintError::Decode { path, .. } => path,
            FingerprintError::EmptyImage { path } => path,
        }
    }
}

/// Errors in user-supplied configuration
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid threshold: {value} (must be a percentage between 0 and 100)")]
    InvalidThreshold { value: f64 },

    #[error("No file extensions configured")]
    NoExtensions,
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, DupeFinderError>;
