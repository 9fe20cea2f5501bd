use crate::report::{Verdict, VerificationReport};

/// Ratios strictly above this are a match
pub const DEFAULT_MATCH_RATIO_CUTOFF: f64 = 0.7;

/// Turns match and keypoint counts into a ratio and a verdict
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    match_ratio_cutoff: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_RATIO_CUTOFF)
    }
}

impl ScoringPolicy {
    pub fn new(match_ratio_cutoff: f64) -> Self {
        Self { match_ratio_cutoff }
    }

    pub fn cutoff(&self) -> f64 {
        self.match_ratio_cutoff
    }

    /// `match_count / max(reference, test, 1)`, always within [0, 1].
    pub fn ratio(&self, match_count: usize, reference_count: usize, test_count: usize) -> f64 {
        let denominator = reference_count.max(test_count).max(1);
        let ratio = match_count as f64 / denominator as f64;
        if ratio > 1.0 {
            log::warn!(
                "{} matches exceed the larger keypoint count {}; clamping ratio to 1",
                match_count,
                denominator
            );
            return 1.0;
        }
        ratio
    }

    /// Strict comparison on the unrounded ratio
    pub fn decide(&self, ratio: f64) -> Verdict {
        if ratio > self.match_ratio_cutoff {
            Verdict::Matched
        } else {
            Verdict::NotMatched
        }
    }

    pub fn score(&self, reference_count: usize, test_count: usize, match_count: usize) -> VerificationReport {
        let ratio = self.ratio(match_count, reference_count, test_count);
        VerificationReport::new(reference_count, test_count, match_count, ratio, self.decide(ratio))
    }
}
