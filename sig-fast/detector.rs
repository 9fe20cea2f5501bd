use rayon::prelude::*;
use sig_core::{BinaryImage, FeatureConfig, Keypoint};

use crate::corner_detection::CornerDetector;
use crate::error::{FastError, FastResult};
use crate::refinement::KeypointRefinement;

/// FAST corner detector for binary images
#[derive(Debug, Clone)]
pub struct FastDetector {
    cfg: FeatureConfig,
}

impl FastDetector {
    /// Creates a new FAST detector with validation
    pub fn new(cfg: FeatureConfig) -> FastResult<Self> {
        Self::validate_config(&cfg)?;
        Ok(Self { cfg })
    }

    /// Check every setting the detector and descriptor rely on
    pub fn validate_config(cfg: &FeatureConfig) -> FastResult<()> {
        // 0 would detect everything, >127 could cause issues with u8 arithmetic
        if cfg.fast_threshold == 0 || cfg.fast_threshold > 127 {
            return Err(FastError::InvalidThreshold(cfg.fast_threshold));
        }
        if cfg.patch_size % 2 == 0 || cfg.patch_size < 7 {
            return Err(FastError::InvalidPatchSize(cfg.patch_size));
        }
        if cfg.max_features == 0 {
            return Err(FastError::InvalidMaxFeatures(cfg.max_features));
        }
        if !cfg.nms_distance.is_finite() || cfg.nms_distance < 0.0 {
            return Err(FastError::InvalidNmsDistance(cfg.nms_distance));
        }
        if cfg.n_threads == 0 {
            return Err(FastError::InvalidThreads(cfg.n_threads));
        }
        Ok(())
    }

    /// Detect, suppress, cap and orient keypoints. Output is ordered
    /// strongest first and is identical for identical images.
    pub fn detect_keypoints(&self, img: &BinaryImage) -> Vec<Keypoint> {
        let candidates = self.detect_keypoints_with_response(img);
        let kept = KeypointRefinement::non_maximum_suppression(
            &candidates,
            self.cfg.nms_distance,
            self.cfg.max_features,
        );
        log::trace!(
            "FAST: {} candidates, {} after suppression",
            candidates.len(),
            kept.len()
        );

        let radius = self.cfg.patch_size / 2;
        kept.into_par_iter()
            .map(|kp| Keypoint {
                angle: KeypointRefinement::compute_orientation(img, kp.x, kp.y, radius),
                ..kp
            })
            .collect()
    }

    /// Raw FAST corners with Harris responses, before suppression
    pub fn detect_keypoints_with_response(&self, img: &BinaryImage) -> Vec<Keypoint> {
        CornerDetector::detect_candidates(img, self.cfg.border(), self.cfg.fast_threshold)
    }

    /// Get detector configuration
    pub fn config(&self) -> &FeatureConfig {
        &self.cfg
    }
}
