//! File filtering logic for the scanner.

use super::ImageFormat;
use crate::error::ConfigError;
use std::collections::HashSet;
use std::path::Path;

/// Extensions considered when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "gif", "png"];

/// Parse a comma-separated extension list such as `"jpg, .PNG,gif"`.
///
/// Entries are trimmed, lowercased and stripped of a leading dot; empty
/// entries are dropped.
pub fn parse_extensions(list: &str) -> Result<Vec<String>, ConfigError> {
    let extensions: Vec<String> = list
        .split(',')
        .map(|e| e.trim().trim_start_matches('.').to_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    if extensions.is_empty() {
        return Err(ConfigError::NoExtensions);
    }
    Ok(extensions)
}

/// Filters files by extension and visibility
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Lowercased file extensions to include
    extensions: HashSet<String>,
    /// Whether to include hidden files
    include_hidden: bool,
}

impl ImageFilter {
    /// Create a filter accepting the default extensions, hidden files included
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: true,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.extensions = extensions.iter().map(|e| e.to_lowercase()).collect();
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden && is_hidden(path) {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }

    /// Get the image format for a path
    pub fn get_format(&self, path: &Path) -> ImageFormat {
        ImageFormat::from_path(path)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the final path component starts with a dot
pub(super) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}
