use std::path::Path;

use serde::{Deserialize, Serialize};
use sig_core::FeatureConfig;
use sig_fast::{FastDetector, FastError};
use thiserror::Error;

use crate::normalize::DEFAULT_THRESHOLD;
use crate::score::DEFAULT_MATCH_RATIO_CUTOFF;

/// Configuration loading and validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read or write config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("Failed to serialize TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Unsupported config format: {0} (expected .toml or .json)")]
    UnsupportedFormat(String),
    #[error("Invalid match ratio cutoff: {0} (must be within [0, 1])")]
    InvalidCutoff(f64),
    #[error("Invalid feature settings: {0}")]
    Features(#[from] FastError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Complete verifier configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Grayscale cutoff; samples strictly above it become paper
    pub binarize_threshold: u8,
    /// Ratios strictly above this are reported as a match
    pub match_ratio_cutoff: f64,
    /// Require mutual nearest neighbours when matching
    pub cross_check: bool,
    /// Detector and descriptor settings
    pub features: FeatureConfig,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            binarize_threshold: DEFAULT_THRESHOLD,
            match_ratio_cutoff: DEFAULT_MATCH_RATIO_CUTOFF,
            cross_check: true,
            features: FeatureConfig::default(),
        }
    }
}

impl VerifierConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> ConfigResult<()> {
        if !(0.0..=1.0).contains(&self.match_ratio_cutoff) {
            return Err(ConfigError::InvalidCutoff(self.match_ratio_cutoff));
        }
        FastDetector::validate_config(&self.features)?;
        Ok(())
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "VerifierConfig: binarize>{}, cutoff>{:.2}, cross_check={}, fast_threshold={}, patch_size={}, max_features={}, nms={:.1}, threads={}",
            self.binarize_threshold,
            self.match_ratio_cutoff,
            self.cross_check,
            self.features.fast_threshold,
            self.features.patch_size,
            self.features.max_features,
            self.features.nms_distance,
            self.features.n_threads
        )
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Deserialize from TOML string
    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file, chosen by extension
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let ext = Self::extension(path)?;
        let content = std::fs::read_to_string(path)?;
        match ext.as_str() {
            "json" => Self::from_json(&content),
            _ => Self::from_toml(&content),
        }
    }

    /// Save to a `.toml` or `.json` file, chosen by extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = match Self::extension(path)?.as_str() {
            "json" => self.to_json()?,
            _ => self.to_toml()?,
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    fn extension(path: &Path) -> ConfigResult<String> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "json" | "toml" => Ok(ext),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
