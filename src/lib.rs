//! # Image Dupe Finder
//!
//! Finds visually similar images by reducing each one to a 256-bit
//! perceptual fingerprint and clustering fingerprints that differ in fewer
//! than a threshold number of bits.
//!
//! ## Architecture
//! - `core` - Transforms, fingerprinting, comparison, scanning and the pipeline
//! - `events` - Event-driven progress reporting
//! - `error` - Error types
//!
//! ## Example
//! ```rust,ignore
//! use image_dupe_finder::core::pipeline::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .paths(vec!["/photos".into()])
//!     .build()
//!     .run()?;
//! for group in &result.groups {
//!     println!("{:?}", group.photos);
//! }
//! ```

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{DupeFinderError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `RUST_LOG`
/// overrides the default level, which is `warn` (or `debug` when verbose).
/// Logs go to stderr so they never mix with reported matches.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
