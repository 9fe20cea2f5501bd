use image::DynamicImage;
use sig_core::{BinaryImage, DescriptorMatcher, FeatureExtractor, Features, Match};
use sig_match::BruteForceMatcher;

use crate::config::VerifierConfig;
use crate::error::{ImageRole, VerifyError, VerifyResult};
use crate::extractor::OrbExtractor;
use crate::normalize::{normalize, normalize_image};
use crate::report::VerificationReport;
use crate::score::ScoringPolicy;

/// One input after normalization and extraction
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    pub image: BinaryImage,
    pub features: Features,
}

/// Report together with the intermediate data it was computed from
#[derive(Debug, Clone, PartialEq)]
pub struct Verification {
    pub report: VerificationReport,
    pub reference: Side,
    pub test: Side,
    pub matches: Vec<Match>,
}

/// Compares a reference signature against a test signature.
///
/// A verifier holds only its configuration and collaborators; every call
/// keeps its images, keypoints and descriptors local, so one instance can
/// serve concurrent calls through `&self`.
#[derive(Debug)]
pub struct Verifier<E = OrbExtractor, M = BruteForceMatcher> {
    config: VerifierConfig,
    policy: ScoringPolicy,
    extractor: E,
    matcher: M,
}

impl Verifier {
    /// Verifier with the FAST/BRIEF extractor and brute-force matcher
    pub fn new(config: VerifierConfig) -> VerifyResult<Self> {
        config.validate()?;
        let extractor = OrbExtractor::new(config.features.clone())?;
        Ok(Self::assemble(config, extractor, BruteForceMatcher::new()))
    }
}

impl<E: FeatureExtractor, M: DescriptorMatcher> Verifier<E, M> {
    /// Verifier with caller-provided collaborators
    pub fn with_collaborators(config: VerifierConfig, extractor: E, matcher: M) -> VerifyResult<Self> {
        config.validate()?;
        Ok(Self::assemble(config, extractor, matcher))
    }

    fn assemble(config: VerifierConfig, extractor: E, matcher: M) -> Self {
        let policy = ScoringPolicy::new(config.match_ratio_cutoff);
        Self {
            config,
            policy,
            extractor,
            matcher,
        }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Decode, extract, match and score two encoded images
    pub fn verify(&self, reference: &[u8], test: &[u8]) -> VerifyResult<VerificationReport> {
        Ok(self.verify_detailed(reference, test)?.report)
    }

    /// Like [`Verifier::verify`], keeping the binary images, features and
    /// matches for inspection or visualization.
    pub fn verify_detailed(&self, reference: &[u8], test: &[u8]) -> VerifyResult<Verification> {
        let threshold = self.config.binarize_threshold;
        let reference = normalize(reference, threshold)
            .map_err(|e| VerifyError::from_normalize(ImageRole::Reference, e))?;
        let test = normalize(test, threshold).map_err(|e| VerifyError::from_normalize(ImageRole::Test, e))?;
        self.run(reference, test)
    }

    /// Pipeline entry for images that are already decoded
    pub fn verify_images(&self, reference: &DynamicImage, test: &DynamicImage) -> VerifyResult<Verification> {
        let threshold = self.config.binarize_threshold;
        let reference = normalize_image(reference, threshold)
            .map_err(|e| VerifyError::from_normalize(ImageRole::Reference, e))?;
        let test =
            normalize_image(test, threshold).map_err(|e| VerifyError::from_normalize(ImageRole::Test, e))?;
        self.run(reference, test)
    }

    fn run(&self, reference: BinaryImage, test: BinaryImage) -> VerifyResult<Verification> {
        log::debug!(
            "normalized reference {}x{} and test {}x{} at threshold {}",
            reference.width(),
            reference.height(),
            test.width(),
            test.height(),
            self.config.binarize_threshold
        );

        let reference_features = self.extract(ImageRole::Reference, &reference)?;
        let test_features = self.extract(ImageRole::Test, &test)?;

        let matches = self
            .matcher
            .match_descriptors(
                reference_features.descriptors(),
                test_features.descriptors(),
                self.config.cross_check,
            )
            .map_err(|e| VerifyError::Matcher { source: Box::new(e) })?;
        log::debug!(
            "matched {} pairs (cross_check={})",
            matches.len(),
            self.config.cross_check
        );

        let report = self
            .policy
            .score(reference_features.len(), test_features.len(), matches.len());
        log::info!("{}", report);

        Ok(Verification {
            report,
            reference: Side {
                image: reference,
                features: reference_features,
            },
            test: Side {
                image: test,
                features: test_features,
            },
            matches,
        })
    }

    fn extract(&self, role: ImageRole, image: &BinaryImage) -> VerifyResult<Features> {
        let features = self
            .extractor
            .extract(image)
            .map_err(|e| VerifyError::Extractor {
                role,
                source: Box::new(e),
            })?;
        log::debug!("extracted {} keypoints from {} image", features.len(), role);
        Ok(features)
    }
}

/// One-shot verification with the default collaborators
pub fn verify(reference: &[u8], test: &[u8], threshold: u8, match_ratio_cutoff: f64) -> VerifyResult<VerificationReport> {
    let config = VerifierConfig {
        binarize_threshold: threshold,
        match_ratio_cutoff,
        ..VerifierConfig::default()
    };
    Verifier::new(config)?.verify(reference, test)
}
