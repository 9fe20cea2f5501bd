use crate::config::VerifierConfig;
use crate::error::VerifyResult;
use crate::pipeline::Verifier;

/// Fluent construction of a [`Verifier`] with the default collaborators
#[derive(Debug, Clone, Default)]
pub struct VerifierBuilder {
    config: VerifierConfig,
}

impl VerifierBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Grayscale cutoff used to binarize both inputs
    pub fn binarize_threshold(mut self, threshold: u8) -> Self {
        self.config.binarize_threshold = threshold;
        self
    }

    /// Ratio that must be exceeded for a match
    pub fn match_ratio_cutoff(mut self, cutoff: f64) -> Self {
        self.config.match_ratio_cutoff = cutoff;
        self
    }

    pub fn cross_check(mut self, enable: bool) -> Self {
        self.config.cross_check = enable;
        self
    }

    /// Set the FAST threshold (1-127)
    pub fn fast_threshold(mut self, threshold: u8) -> Self {
        self.config.features.fast_threshold = threshold;
        self
    }

    /// Set the patch size for orientation and description
    pub fn patch_size(mut self, patch_size: usize) -> Self {
        self.config.features.patch_size = patch_size;
        self
    }

    pub fn max_features(mut self, max_features: usize) -> Self {
        self.config.features.max_features = max_features;
        self
    }

    /// Set the non-maximum suppression (NMS) distance
    pub fn nms_distance(mut self, distance: f32) -> Self {
        self.config.features.nms_distance = distance;
        self
    }

    /// Set the number of threads for extraction
    pub fn threads(mut self, n_threads: usize) -> Self {
        self.config.features.n_threads = n_threads;
        self
    }

    /// Validate the settings and build the verifier
    pub fn build(self) -> VerifyResult<Verifier> {
        Verifier::new(self.config)
    }

    /// Generate a summary of the builder's configuration
    pub fn summary(&self) -> String {
        self.config.summary()
    }

    /// Create a builder from an existing `VerifierConfig`
    pub fn from_config(config: VerifierConfig) -> Self {
        Self { config }
    }

    /// Convert the builder into a `VerifierConfig`
    pub fn to_config(self) -> VerifierConfig {
        self.config
    }
}
