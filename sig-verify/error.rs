use std::fmt;

use serde::{Deserialize, Serialize};
use sig_core::CoreError;
use thiserror::Error;

use crate::config::ConfigError;
use crate::extractor::SetupError;
use crate::normalize::NormalizeError;

/// Collaborator failure, kept as the error value it reported
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which of the two inputs an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    Reference,
    Test,
}

impl fmt::Display for ImageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageRole::Reference => write!(f, "reference"),
            ImageRole::Test => write!(f, "test"),
        }
    }
}

/// Pipeline stage that produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Setup,
    Normalize,
    Extract,
    Match,
}

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Failed to decode {role} image: {source}")]
    Decode {
        role: ImageRole,
        source: image::ImageError,
    },
    #[error("The {role} image is empty ({width}x{height})")]
    EmptyImage {
        role: ImageRole,
        width: u32,
        height: u32,
    },
    #[error("Invalid {role} image: {source}")]
    InvalidImage { role: ImageRole, source: CoreError },
    #[error("Feature extraction failed for {role} image: {source}")]
    Extractor { role: ImageRole, source: BoxError },
    #[error("Descriptor matching failed: {source}")]
    Matcher { source: BoxError },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Setup(#[from] SetupError),
}

impl VerifyError {
    pub(crate) fn from_normalize(role: ImageRole, err: NormalizeError) -> Self {
        match err {
            NormalizeError::Decode(source) => VerifyError::Decode { role, source },
            NormalizeError::Empty { width, height } => VerifyError::EmptyImage { role, width, height },
            NormalizeError::Image(source) => VerifyError::InvalidImage { role, source },
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            VerifyError::Decode { .. }
            | VerifyError::EmptyImage { .. }
            | VerifyError::InvalidImage { .. } => Stage::Normalize,
            VerifyError::Extractor { .. } => Stage::Extract,
            VerifyError::Matcher { .. } => Stage::Match,
            VerifyError::Config(_) | VerifyError::Setup(_) => Stage::Setup,
        }
    }

    /// The image the error is about, when it concerns a single one
    pub fn role(&self) -> Option<ImageRole> {
        match self {
            VerifyError::Decode { role, .. }
            | VerifyError::EmptyImage { role, .. }
            | VerifyError::InvalidImage { role, .. }
            | VerifyError::Extractor { role, .. } => Some(*role),
            _ => None,
        }
    }
}

pub type VerifyResult<T> = Result<T, VerifyError>;
