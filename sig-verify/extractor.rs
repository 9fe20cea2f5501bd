use sig_brief::BriefGenerator;
use sig_core::{BinaryImage, CoreError, FeatureConfig, FeatureExtractor, Features};
use sig_fast::{FastDetector, FastError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("FAST error: {0}")]
    Fast(#[from] FastError),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Default extractor: FAST corners with Harris ranking, described by
/// steered BRIEF. Work runs on a private pool of `n_threads` workers.
pub struct OrbExtractor {
    detector: FastDetector,
    brief: BriefGenerator,
    pool: rayon::ThreadPool,
}

impl OrbExtractor {
    pub fn new(cfg: FeatureConfig) -> Result<Self, SetupError> {
        let detector = FastDetector::new(cfg)?;
        let cfg = detector.config();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(cfg.n_threads)
            .thread_name(|i| format!("sig-extract-{i}"))
            .build()?;
        let brief = BriefGenerator::new(cfg.patch_size);
        Ok(Self { detector, brief, pool })
    }

    pub fn config(&self) -> &FeatureConfig {
        self.detector.config()
    }
}

impl std::fmt::Debug for OrbExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrbExtractor")
            .field("config", self.config())
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}

impl FeatureExtractor for OrbExtractor {
    type Error = CoreError;

    fn extract(&self, image: &BinaryImage) -> Result<Features, CoreError> {
        self.pool.install(|| {
            let keypoints = self.detector.detect_keypoints(image);
            if keypoints.is_empty() {
                return Ok(Features::empty());
            }
            let descriptors = self.brief.generate_descriptors(image, &keypoints);
            Features::new(keypoints, descriptors)
        })
    }
}
