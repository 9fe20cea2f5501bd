#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings shared by the default detector, descriptor and extractor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeatureConfig {
    /// FAST intensity threshold (1-127)
    pub fast_threshold: u8,
    /// Side of the square patch used for orientation and description (odd)
    pub patch_size: usize,
    /// Upper bound on keypoints kept per image
    pub max_features: usize,
    /// Minimum distance between two retained keypoints
    pub nms_distance: f32,
    /// Worker threads for row scanning and description
    pub n_threads: usize,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            fast_threshold: 20,
            patch_size: 31,
            max_features: 500,
            nms_distance: 3.0,
            n_threads: num_cpus::get().max(1),
        }
    }
}

impl FeatureConfig {
    /// Distance from every edge a keypoint must keep so its patch fits.
    pub fn border(&self) -> usize {
        self.patch_size / 2 + 3
    }
}
