//! # Core Module
//!
//! The duplicate detection engine.
//!
//! ## Modules
//! - `transform` - Raster stages: resample, grayscale, blur, levels
//! - `fingerprint` - Decodes images and packs them into 256-bit fingerprints
//! - `comparator` - Hamming comparison and transitive clustering
//! - `scanner` - Discovers candidate images in directories
//! - `pipeline` - Orchestrates the full workflow

pub mod comparator;
pub mod fingerprint;
pub mod pipeline;
pub mod scanner;
pub mod transform;

// Re-export commonly used types
pub use comparator::{
    find_clusters, DuplicateGroup, MatchResult, MatchThreshold, MatchType, SourceRecord,
};
pub use fingerprint::{fingerprint_file, fingerprint_image, Fingerprint, PerceptualHash};
pub use scanner::ImageFile;
