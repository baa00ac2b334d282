//! Directory walking implementation using walkdir.

use super::filter::{is_hidden, ImageFilter, DEFAULT_EXTENSIONS};
use super::{ImageFile, ImageScanner, ScanResult};
use crate::error::ScanError;
use crate::events::{null_sender, Event, EventSender, ScanEvent, ScanProgress};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Lowercased extensions to include
    pub extensions: Vec<String>,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Whether to follow symbolic links to directories
    pub follow_symlinks: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: true,
            follow_symlinks: false,
            max_depth: None,
        }
    }
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let filter = ImageFilter::new()
            .with_hidden(config.include_hidden)
            .with_extensions(&config.extensions);

        Self { config, filter }
    }

    /// Scan a single root, which may be a directory or a file
    fn scan_root(
        &self,
        root: &Path,
        events: &EventSender,
        files: &mut Vec<ImageFile>,
        errors: &mut Vec<ScanError>,
    ) {
        if !root.exists() {
            let error = ScanError::PathNotFound {
                path: root.to_path_buf(),
            };
            report_error(events, root, &error);
            errors.push(error);
            return;
        }

        debug!(root = %root.display(), "scanning");

        let mut directories_scanned = 0;
        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let include_hidden = self.config.include_hidden;
        let entries = walker
            .into_iter()
            .filter_entry(|e| include_hidden || e.depth() == 0 || !is_hidden(e.path()));

        for entry_result in entries {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    let error = if e.io_error().map(|io| io.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path: path.clone() }
                    } else {
                        ScanError::ReadDirectory {
                            path: path.clone(),
                            source: std::io::Error::other(e.to_string()),
                        }
                    };
                    report_error(events, &path, &error);
                    errors.push(error);
                    continue;
                }
            };

            let path = entry.path();

            if entry.file_type().is_dir() {
                directories_scanned += 1;
                events.send(Event::Scan(ScanEvent::Progress(ScanProgress {
                    directories_scanned,
                    files_found: files.len(),
                    current_path: path.to_path_buf(),
                })));
                continue;
            }

            if !self.filter.should_include(path) {
                continue;
            }

            let file = ImageFile {
                path: path.to_path_buf(),
                format: self.filter.get_format(path),
            };
            events.send(Event::Scan(ScanEvent::FileFound {
                path: file.path.clone(),
            }));
            files.push(file);
        }
    }
}

fn report_error(events: &EventSender, path: &Path, error: &ScanError) {
    events.send(Event::Scan(ScanEvent::Error {
        path: path.to_path_buf(),
        message: error.to_string(),
    }));
}

impl ImageScanner for WalkDirScanner {
    fn scan(&self, paths: &[PathBuf]) -> ScanResult {
        self.scan_with_events(paths, &null_sender())
    }

    fn scan_with_events(&self, paths: &[PathBuf], events: &EventSender) -> ScanResult {
        events.send(Event::Scan(ScanEvent::Started {
            paths: paths.to_vec(),
        }));
        debug!(extensions = ?self.config.extensions, "scanning for extensions");

        let mut files = Vec::new();
        let mut errors = Vec::new();

        for path in paths {
            self.scan_root(path, events, &mut files, &mut errors);
        }

        events.send(Event::Scan(ScanEvent::Completed {
            total_files: files.len(),
        }));

        ScanResult { files, errors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scanner::ImageFormat;
    use std::fs::{self, File};
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(&path).unwrap();
        path
    }

    fn names(result: &ScanResult, root: &Path) -> Vec<String> {
        result
            .files
            .iter()
            .map(|f| f.path.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = WalkDirScanner::new(ScanConfig::default());

        let result = scanner.scan(&[temp_dir.path().to_path_buf()]);

        assert!(result.files.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_filters_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "photo.jpg");
        touch(temp_dir.path(), "photo.PNG");
        touch(temp_dir.path(), "notes.txt");
        touch(temp_dir.path(), "clip.mp4");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[temp_dir.path().to_path_buf()]);

        assert_eq!(names(&result, temp_dir.path()), vec!["photo.PNG", "photo.jpg"]);
        assert_eq!(result.files[1].format, ImageFormat::Jpeg);
    }

    #[test]
    fn scan_order_is_sorted_and_recursive() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "b.jpg");
        touch(temp_dir.path(), "a/z.gif");
        touch(temp_dir.path(), "a/m.png");
        touch(temp_dir.path(), "c.jpeg");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[temp_dir.path().to_path_buf()]);

        assert_eq!(
            names(&result, temp_dir.path()),
            vec!["a/m.png", "a/z.gif", "b.jpg", "c.jpeg"]
        );
    }

    #[test]
    fn roots_are_visited_in_given_order() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "first/1.jpg");
        touch(temp_dir.path(), "second/2.jpg");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[
            temp_dir.path().join("second"),
            temp_dir.path().join("first"),
        ]);

        assert_eq!(names(&result, temp_dir.path()), vec!["second/2.jpg", "first/1.jpg"]);
    }

    #[test]
    fn file_root_is_included() {
        let temp_dir = TempDir::new().unwrap();
        let path = touch(temp_dir.path(), "single.png");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[path.clone()]);

        assert_eq!(result.files.len(), 1);
        assert_eq!(result.files[0].path, path);
    }

    #[test]
    fn hidden_files_included_by_default() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "visible.jpg");
        touch(temp_dir.path(), ".hidden.jpg");
        touch(temp_dir.path(), ".cache/inner.jpg");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[temp_dir.path().to_path_buf()]);

        assert_eq!(result.files.len(), 3);
    }

    #[test]
    fn hidden_files_and_directories_can_be_excluded() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "visible.jpg");
        touch(temp_dir.path(), ".hidden.jpg");
        touch(temp_dir.path(), ".cache/inner.jpg");

        let config = ScanConfig {
            include_hidden: false,
            ..Default::default()
        };
        let scanner = WalkDirScanner::new(config);
        let result = scanner.scan(&[temp_dir.path().to_path_buf()]);

        assert_eq!(names(&result, temp_dir.path()), vec!["visible.jpg"]);
    }

    #[test]
    fn custom_extensions_are_honoured() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.jpg");
        touch(temp_dir.path(), "b.bmp");

        let config = ScanConfig {
            extensions: vec!["bmp".to_string()],
            ..Default::default()
        };
        let result = WalkDirScanner::new(config).scan(&[temp_dir.path().to_path_buf()]);

        assert_eq!(names(&result, temp_dir.path()), vec!["b.bmp"]);
    }

    #[test]
    fn max_depth_limits_recursion() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "top.jpg");
        touch(temp_dir.path(), "nested/deep.jpg");

        let config = ScanConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let result = WalkDirScanner::new(config).scan(&[temp_dir.path().to_path_buf()]);

        assert_eq!(names(&result, temp_dir.path()), vec!["top.jpg"]);
    }

    #[test]
    fn nonexistent_root_is_recorded_as_error() {
        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(&[PathBuf::from("/nonexistent/path/12345")]);

        assert!(result.files.is_empty());
        assert!(matches!(result.errors[0], ScanError::PathNotFound { .. }));
    }

    #[test]
    fn scan_emits_started_and_completed() {
        use crate::events::EventChannel;

        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "a.jpg");

        let (sender, receiver) = EventChannel::new();
        let scanner = WalkDirScanner::new(ScanConfig::default());
        scanner.scan_with_events(&[temp_dir.path().to_path_buf()], &sender);
        drop(sender);

        let events: Vec<_> = receiver.iter().collect();
        assert!(matches!(events[0], Event::Scan(ScanEvent::Started { .. })));
        assert!(matches!(
            events.last(),
            Some(Event::Scan(ScanEvent::Completed { total_files: 1 }))
        ));
    }
}
