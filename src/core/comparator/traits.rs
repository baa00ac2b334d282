//! Trait definitions for comparison strategies.

use super::MatchThreshold;

/// Strategy trait for deciding whether two fingerprints are possible duplicates
pub trait ComparisonStrategy: Send + Sync {
    /// Whether two images `distance` bits apart should be linked
    fn is_match(&self, distance: u32) -> bool;

    /// Get the threshold used, in bits
    fn threshold_bits(&self) -> u32;

    /// Human-readable description of the strategy
    fn description(&self) -> String;
}

/// Links images whose fingerprints differ by fewer than `threshold` bits
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdStrategy {
    threshold: MatchThreshold,
}

impl ThresholdStrategy {
    /// Create a new threshold strategy
    pub fn new(threshold: MatchThreshold) -> Self {
        Self { threshold }
    }
}

impl Default for ThresholdStrategy {
    fn default() -> Self {
        Self::new(MatchThreshold::default())
    }
}

impl ComparisonStrategy for ThresholdStrategy {
    fn is_match(&self, distance: u32) -> bool {
        distance < self.threshold.bits()
    }

    fn threshold_bits(&self) -> u32 {
        self.threshold.bits()
    }

    fn description(&self) -> String {
        format!(
            "Threshold strategy: images differing by fewer than {} bits ({}%) are possible matches",
            self.threshold.bits(),
            self.threshold.percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let strategy = ThresholdStrategy::new(MatchThreshold::from_bits(26));

        assert!(strategy.is_match(0));
        assert!(strategy.is_match(25));
        assert!(!strategy.is_match(26));
        assert!(!strategy.is_match(27));
    }

    #[test]
    fn zero_threshold_matches_nothing() {
        let strategy = ThresholdStrategy::new(MatchThreshold::from_percent(0.0).unwrap());
        assert!(!strategy.is_match(0));
    }

    #[test]
    fn default_uses_ten_percent() {
        assert_eq!(ThresholdStrategy::default().threshold_bits(), 26);
    }

    #[test]
    fn description_includes_threshold() {
        let strategy = ThresholdStrategy::new(MatchThreshold::from_bits(7));
        assert!(strategy.description().contains("7 bits"));
    }
}
