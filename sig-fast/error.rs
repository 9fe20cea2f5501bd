use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FastError {
    #[error("Invalid threshold: {0} (must be 1-127)")]
    InvalidThreshold(u8),
    #[error("Invalid patch size: {0} (must be odd and at least 7)")]
    InvalidPatchSize(usize),
    #[error("Invalid max features: {0} (must be > 0)")]
    InvalidMaxFeatures(usize),
    #[error("Invalid NMS distance: {0} (must be finite and >= 0)")]
    InvalidNmsDistance(f32),
    #[error("Invalid thread count: {0} (must be > 0)")]
    InvalidThreads(usize),
}

pub type FastResult<T> = Result<T, FastError>;
