//! # Comparator Module
//!
//! Finds possible duplicates by comparing fingerprints.
//!
//! ## How It Works
//! 1. Compare all fingerprint pairs using Hamming distance
//! 2. Link pairs that differ by fewer than the threshold bit count
//! 3. Group linked images into clusters (transitive grouping)
//!
//! The threshold is given as a percentage of the 256 fingerprint bits and
//! converted once with `round(256 * pct / 100)`; the default 10% is 26 bits.
//!
//! ## Match Types
//! | Closest distance | Classification |
//! |------------------|----------------|
//! | 0                | Exact match    |
//! | 1-16             | Near-exact     |
//! | 17+              | Similar        |

mod adjacency;
mod grouper;
mod traits;

pub use adjacency::AdjacencyMap;
pub use grouper::TransitiveGrouper;
pub use traits::{ComparisonStrategy, ThresholdStrategy};

use crate::core::fingerprint::{Fingerprint, PerceptualHash, FINGERPRINT_BITS};
use crate::error::ConfigError;
use crate::events::{CompareEvent, CompareProgress, Event, EventSender};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Match threshold, kept both as the configured percentage and as bits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThreshold {
    percent: f64,
    bits: u32,
}

impl MatchThreshold {
    /// Percentage used when none is configured
    pub const DEFAULT_PERCENT: f64 = 10.0;

    /// Build a threshold from a percentage of the fingerprint bits (0-100)
    pub fn from_percent(percent: f64) -> Result<Self, ConfigError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(ConfigError::InvalidThreshold { value: percent });
        }
        Ok(Self {
            percent,
            bits: threshold_bits(percent),
        })
    }

    /// Build a threshold from an exact bit count (capped at 256)
    pub fn from_bits(bits: u32) -> Self {
        let bits = bits.min(FINGERPRINT_BITS);
        Self {
            percent: f64::from(bits) * 100.0 / f64::from(FINGERPRINT_BITS),
            bits,
        }
    }

    /// Threshold in bits; pairs must differ by fewer than this
    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Threshold as a percentage of the fingerprint bits
    pub fn percent(&self) -> f64 {
        self.percent
    }
}

impl Default for MatchThreshold {
    fn default() -> Self {
        Self {
            percent: Self::DEFAULT_PERCENT,
            bits: threshold_bits(Self::DEFAULT_PERCENT),
        }
    }
}

/// Convert a percentage of the fingerprint width to a bit count
pub fn threshold_bits(percent: f64) -> u32 {
    (f64::from(FINGERPRINT_BITS) * percent / 100.0).round() as u32
}

/// A fingerprint paired with the image it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Path of the source image
    pub path: PathBuf,
    /// The image's fingerprint
    pub fingerprint: Fingerprint,
}

impl SourceRecord {
    /// Pair a path with its fingerprint
    pub fn new(path: PathBuf, fingerprint: Fingerprint) -> Self {
        Self { path, fingerprint }
    }
}

/// A pair of images within the threshold, by index (`a < b`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Index of the first image
    pub a: usize,
    /// Index of the second image
    pub b: usize,
    /// Hamming distance between the fingerprints
    pub distance: u32,
}

/// Classification of match types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchType {
    /// Distance = 0, identical fingerprints
    Exact,
    /// Distance 1-16, virtually identical
    NearExact,
    /// Anything further that still passed the threshold
    Similar,
}

impl MatchType {
    /// Classify based on Hamming distance
    pub fn from_distance(distance: u32) -> Self {
        match distance {
            0 => MatchType::Exact,
            1..=16 => MatchType::NearExact,
            _ => MatchType::Similar,
        }
    }
}

impl std::fmt::Display for MatchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchType::Exact => write!(f, "Exact Match"),
            MatchType::NearExact => write!(f, "Near-Exact Match"),
            MatchType::Similar => write!(f, "Similar"),
        }
    }
}

/// A cluster of possible duplicates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Indices into the fingerprinted records, ascending
    pub indices: Vec<usize>,
    /// Paths of the members, in the same order as `indices`
    pub photos: Vec<PathBuf>,
    /// Classification of the closest pair in the group
    pub match_type: MatchType,
    /// Smallest distance among the group's recorded pairs
    pub closest_distance: u32,
    /// Average distance over the group's recorded pairs
    pub average_distance: f64,
}

impl DuplicateGroup {
    /// Number of images in the group
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the group has no members
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Find every pair of fingerprints the strategy links, in ascending
/// `(a, b)` order.
pub fn find_matching_pairs(
    fingerprints: &[Fingerprint],
    strategy: &dyn ComparisonStrategy,
) -> Vec<MatchResult> {
    let mut matches = Vec::new();

    for i in 0..fingerprints.len() {
        for j in (i + 1)..fingerprints.len() {
            let distance = fingerprints[i].diff_bits(&fingerprints[j]);
            if strategy.is_match(distance) {
                matches.push(MatchResult { a: i, b: j, distance });
            }
        }
    }

    matches
}

/// Parallel version of [`find_matching_pairs`]: rows of the pair space are
/// split across the rayon pool. Output order is identical.
pub fn find_matching_pairs_parallel(
    fingerprints: &[Fingerprint],
    strategy: &dyn ComparisonStrategy,
) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = (0..fingerprints.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let a = &fingerprints[i];
            ((i + 1)..fingerprints.len()).filter_map(move |j| {
                let distance = a.diff_bits(&fingerprints[j]);
                strategy
                    .is_match(distance)
                    .then_some(MatchResult { a: i, b: j, distance })
            })
        })
        .collect();

    matches.sort_unstable_by_key(|m| (m.a, m.b));
    matches
}

/// Find matching pairs with progress events
///
/// Emits progress events every ~1000 comparisons to update the UI.
pub fn find_matching_pairs_with_events(
    fingerprints: &[Fingerprint],
    strategy: &dyn ComparisonStrategy,
    events: &EventSender,
) -> Vec<MatchResult> {
    let n = fingerprints.len();
    let total_comparisons = n.saturating_sub(1) * n / 2;

    events.send(Event::Compare(CompareEvent::Started { total_images: n }));

    let mut matches = Vec::new();
    let mut comparisons_completed = 0;
    let mut last_progress_update = 0;

    // Every 1000 comparisons or 2% of total, whichever is smaller
    let update_interval = std::cmp::min(1000, std::cmp::max(1, total_comparisons / 50));

    for i in 0..n {
        for j in (i + 1)..n {
            let distance = fingerprints[i].diff_bits(&fingerprints[j]);
            if strategy.is_match(distance) {
                matches.push(MatchResult { a: i, b: j, distance });
            }

            comparisons_completed += 1;

            if comparisons_completed - last_progress_update >= update_interval {
                events.send(Event::Compare(CompareEvent::Progress(CompareProgress {
                    comparisons_completed,
                    total_comparisons,
                    matches_found: matches.len(),
                })));
                last_progress_update = comparisons_completed;
            }
        }
    }

    events.send(Event::Compare(CompareEvent::PairsFound {
        total_pairs: matches.len(),
    }));

    matches
}

/// Cluster records whose fingerprints are within `threshold` of each other.
///
/// Compares all pairs, builds the adjacency, and collapses it into disjoint
/// groups ordered by lowest index.
pub fn find_clusters(records: &[SourceRecord], threshold: MatchThreshold) -> Vec<DuplicateGroup> {
    let fingerprints: Vec<Fingerprint> = records.iter().map(|r| r.fingerprint).collect();
    let strategy = ThresholdStrategy::new(threshold);
    let pairs = find_matching_pairs(&fingerprints, &strategy);
    let adjacency = AdjacencyMap::from_pairs(records.len(), &pairs);
    TransitiveGrouper::new().group(adjacency, records)
}
