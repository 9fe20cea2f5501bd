use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Decimal places used whenever a ratio is shown or serialized
pub const DISPLAY_DECIMALS: i32 = 2;

/// Round for display; decisions always use the unrounded value.
pub fn round_for_display(ratio: f64) -> f64 {
    let scale = 10f64.powi(DISPLAY_DECIMALS);
    (ratio * scale).round() / scale
}

fn serialize_rounded<S: Serializer>(ratio: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(round_for_display(*ratio))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Matched,
    NotMatched,
}

impl Verdict {
    pub fn is_match(self) -> bool {
        matches!(self, Verdict::Matched)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Matched => "MATCHED",
            Verdict::NotMatched => "NOT_MATCHED",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one comparison. Built once by the scorer and never mutated.
///
/// Serialization is output only: `matchRatio` is written rounded, so a
/// report cannot be rebuilt from its JSON without losing the value the
/// verdict was decided on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    reference_keypoint_count: usize,
    test_keypoint_count: usize,
    match_count: usize,
    #[serde(serialize_with = "serialize_rounded")]
    match_ratio: f64,
    verdict: Verdict,
}

impl VerificationReport {
    pub(crate) fn new(
        reference_keypoint_count: usize,
        test_keypoint_count: usize,
        match_count: usize,
        match_ratio: f64,
        verdict: Verdict,
    ) -> Self {
        Self {
            reference_keypoint_count,
            test_keypoint_count,
            match_count,
            match_ratio,
            verdict,
        }
    }

    pub fn reference_keypoint_count(&self) -> usize {
        self.reference_keypoint_count
    }

    pub fn test_keypoint_count(&self) -> usize {
        self.test_keypoint_count
    }

    pub fn match_count(&self) -> usize {
        self.match_count
    }

    /// Unrounded ratio the verdict was decided on
    pub fn match_ratio(&self) -> f64 {
        self.match_ratio
    }

    pub fn display_ratio(&self) -> f64 {
        round_for_display(self.match_ratio)
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_match(&self) -> bool {
        self.verdict.is_match()
    }

    /// Markdown breakdown of the comparison with a one-sentence conclusion
    pub fn analysis(&self) -> String {
        let conclusion = match self.verdict {
            Verdict::Matched => {
                "The signatures matched well due to high similarity in structural features and keypoints."
            }
            Verdict::NotMatched => {
                "The signatures did not match due to significant differences in keypoints and structural features."
            }
        };
        format!(
            "**Keypoints Analysis:**\n\
             - Total Keypoints in Reference: {}\n\
             - Total Keypoints in Test: {}\n\
             - Matches Found: {}\n\
             - Match Ratio: {:.2}\n\
             \n\
             ### Result: {}\n",
            self.reference_keypoint_count,
            self.test_keypoint_count,
            self.match_count,
            self.display_ratio(),
            conclusion
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} matches, keypoints {} (reference) / {} (test), ratio {:.2}",
            self.verdict,
            self.match_count,
            self.reference_keypoint_count,
            self.test_keypoint_count,
            self.display_ratio()
        )
    }
}
