//! # Pipeline Module
//!
//! Orchestrates the full duplicate detection workflow.
//!
//! ## Pipeline Stages
//! 1. **Scan** - Enumerate candidate images under the given roots
//! 2. **Fingerprint** - Reduce each image to a 256-bit fingerprint
//! 3. **Compare** - Link every pair closer than the threshold and cluster
//!
//! Files that cannot be read or decoded are logged and left out; they never
//! receive a placeholder fingerprint.
//!
//! ## Parallelism
//! Fingerprinting and pair comparison run on the rayon pool unless disabled.
//! Results are identical either way.

mod executor;

pub use executor::{Pipeline, PipelineBuilder, PipelineConfig, PipelineResult};
