use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Image data length mismatch: expected {expected_len}, got {actual_len}")]
    InvalidImageData { expected_len: usize, actual_len: usize },
    #[error("Empty image: {width}x{height} (both dimensions must be > 0)")]
    EmptyImage { width: usize, height: usize },
    #[error("Sample {value} at index {index} is not binary (expected 0 or 255)")]
    NonBinarySample { index: usize, value: u8 },
    #[error("Feature length mismatch: {keypoints} keypoints, {descriptors} descriptors")]
    LengthMismatch { keypoints: usize, descriptors: usize },
}

pub type CoreResult<T> = Result<T, CoreError>;
