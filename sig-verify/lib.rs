//! Offline signature verification.
//!
//! Both images are binarized, described with FAST/BRIEF features and
//! matched under Hamming distance; the share of matched keypoints decides
//! whether the test signature is accepted.
//!
//! ```no_run
//! use sig_verify::{Verifier, VerifierConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let verifier = Verifier::new(VerifierConfig::default())?;
//! let reference = std::fs::read("reference.png")?;
//! let test = std::fs::read("test.png")?;
//! let report = verifier.verify(&reference, &test)?;
//! println!("{}", report.analysis());
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod error;
mod extractor;
mod normalize;
mod pipeline;
mod report;
mod score;
mod visualize;

pub use builder::VerifierBuilder;
pub use config::{ConfigError, ConfigResult, VerifierConfig};
pub use error::{BoxError, ImageRole, Stage, VerifyError, VerifyResult};
pub use extractor::{OrbExtractor, SetupError};
pub use normalize::{DEFAULT_THRESHOLD, NormalizeError, normalize, normalize_image};
pub use pipeline::{Side, Verification, Verifier, verify};
pub use report::{Verdict, VerificationReport, round_for_display};
pub use score::{DEFAULT_MATCH_RATIO_CUTOFF, ScoringPolicy};
pub use visualize::{draw_matches, save_matches};

pub use sig_core;
