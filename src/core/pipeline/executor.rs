//! Pipeline execution implementation.

use crate::core::comparator::{
    find_matching_pairs_parallel, find_matching_pairs_with_events, AdjacencyMap,
    ComparisonStrategy, DuplicateGroup, MatchThreshold, SourceRecord, ThresholdStrategy,
    TransitiveGrouper,
};
use crate::core::fingerprint::{fingerprint_file, Fingerprint};
use crate::core::scanner::{ImageFile, ImageScanner, ScanConfig, WalkDirScanner};
use crate::error::{ConfigError, DupeFinderError, FingerprintError};
use crate::events::{
    null_sender, CompareEvent, Event, EventSender, FingerprintEvent, FingerprintProgress,
    PipelineEvent, PipelinePhase, PipelineSummary,
};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// Clusters of possible duplicates, ordered by lowest member index
    pub groups: Vec<DuplicateGroup>,
    /// Successfully fingerprinted images, in enumeration order
    pub records: Vec<SourceRecord>,
    /// Candidate files found by the scanner
    pub total_files: usize,
    /// Number of errors encountered (non-fatal)
    pub errors: Vec<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl PipelineResult {
    /// Number of images that produced a fingerprint
    pub fn fingerprinted(&self) -> usize {
        self.records.len()
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directories or files to scan, in order
    pub paths: Vec<PathBuf>,
    /// Pairs must differ by fewer than this many bits
    pub threshold: MatchThreshold,
    /// Scanner configuration
    pub scan_config: ScanConfig,
    /// Fingerprint and compare on the rayon pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            threshold: MatchThreshold::default(),
            scan_config: ScanConfig::default(),
            parallel: true,
        }
    }
}

/// Builder for pipeline configuration
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Set the roots to scan
    pub fn paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.paths = paths;
        self
    }

    /// Set the match threshold
    pub fn threshold(mut self, threshold: MatchThreshold) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Replace the accepted file extensions
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.config.scan_config.extensions = extensions;
        self
    }

    /// Include hidden files
    pub fn include_hidden(mut self, include: bool) -> Self {
        self.config.scan_config.include_hidden = include;
        self
    }

    /// Follow symbolic links while walking
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.config.scan_config.follow_symlinks = follow;
        self
    }

    /// Run on the rayon pool or on the calling thread
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Scan, fingerprint and cluster
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// The configuration this pipeline runs with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<PipelineResult, DupeFinderError> {
        self.run_with_events(&null_sender())
    }

    /// Run the pipeline with event reporting
    pub fn run_with_events(&self, events: &EventSender) -> Result<PipelineResult, DupeFinderError> {
        if self.config.scan_config.extensions.is_empty() {
            return Err(ConfigError::NoExtensions.into());
        }

        let start_time = Instant::now();
        let mut errors = Vec::new();

        events.send(Event::Pipeline(PipelineEvent::Started));

        // Phase 1: Scanning
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Scanning,
        }));

        let scanner = WalkDirScanner::new(self.config.scan_config.clone());
        let scan_result = scanner.scan_with_events(&self.config.paths, events);

        for error in scan_result.errors {
            warn!("{}", error);
            errors.push(error.to_string());
        }

        let files = scan_result.files;
        let total_files = files.len();
        info!(total_files, "scan complete");

        // Phase 2: Fingerprinting
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Fingerprinting,
        }));

        let outcomes = self.fingerprint_all(&files, events);

        let mut records = Vec::with_capacity(outcomes.len());
        for (file, outcome) in files.into_iter().zip(outcomes) {
            match outcome {
                Ok(fingerprint) => records.push(SourceRecord::new(file.path, fingerprint)),
                Err(e) => {
                    warn!("skipping {}", e);
                    errors.push(e.to_string());
                }
            }
        }

        events.send(Event::Fingerprint(FingerprintEvent::Completed {
            fingerprinted: records.len(),
            failed: total_files - records.len(),
        }));

        // Phase 3: Comparing
        events.send(Event::Pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Comparing,
        }));

        let groups = self.cluster(&records, events);

        events.send(Event::Compare(CompareEvent::Completed {
            total_groups: groups.len(),
            grouped_images: groups.iter().map(|g| g.len()).sum(),
        }));

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            fingerprinted = records.len(),
            groups = groups.len(),
            duration_ms,
            "pipeline complete"
        );

        events.send(Event::Pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total_files,
                fingerprinted: records.len(),
                duplicate_groups: groups.len(),
                duration_ms,
            },
        }));

        Ok(PipelineResult {
            groups,
            records,
            total_files,
            errors,
            duration_ms,
        })
    }

    /// Fingerprint every file, keeping one outcome per file in input order
    fn fingerprint_all(
        &self,
        files: &[ImageFile],
        events: &EventSender,
    ) -> Vec<Result<Fingerprint, FingerprintError>> {
        let total = files.len();
        events.send(Event::Fingerprint(FingerprintEvent::Started { total_files: total }));

        let completed = AtomicUsize::new(0);
        let fingerprint_one = |file: &ImageFile| {
            let outcome = fingerprint_file(&file.path);
            let done = completed.fetch_add(1, Ordering::SeqCst) + 1;

            if let Err(e) = &outcome {
                events.send(Event::Fingerprint(FingerprintEvent::Error {
                    path: file.path.clone(),
                    message: e.to_string(),
                }));
            }
            events.send(Event::Fingerprint(FingerprintEvent::Progress(
                FingerprintProgress {
                    completed: done,
                    total,
                    current_path: file.path.clone(),
                },
            )));
            outcome
        };

        if self.config.parallel {
            files.par_iter().map(fingerprint_one).collect()
        } else {
            files.iter().map(fingerprint_one).collect()
        }
    }

    fn cluster(&self, records: &[SourceRecord], events: &EventSender) -> Vec<DuplicateGroup> {
        let fingerprints: Vec<Fingerprint> = records.iter().map(|r| r.fingerprint).collect();
        let strategy = ThresholdStrategy::new(self.config.threshold);
        info!(files = records.len(), "cross-matching");
        debug!(threshold_bits = strategy.threshold_bits(), "{}", strategy.description());

        let pairs = if self.config.parallel {
            events.send(Event::Compare(CompareEvent::Started {
                total_images: fingerprints.len(),
            }));
            let pairs = find_matching_pairs_parallel(&fingerprints, &strategy);
            events.send(Event::Compare(CompareEvent::PairsFound {
                total_pairs: pairs.len(),
            }));
            pairs
        } else {
            find_matching_pairs_with_events(&fingerprints, &strategy, events)
        };
        debug!(
            pairs = pairs.len(),
            threshold_bits = self.config.threshold.bits(),
            "compared fingerprints"
        );

        let adjacency = AdjacencyMap::from_pairs(records.len(), &pairs);
        TransitiveGrouper::new().group(adjacency, records)
    }
}
