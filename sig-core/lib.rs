//! Shared data model for signature verification: binary images, keypoints,
//! binary descriptors, matches, and the two collaborator capabilities the
//! verification pipeline consumes.

mod collaborator;
mod config;
mod error;
mod features;
mod image;

pub use collaborator::{DescriptorMatcher, FeatureExtractor};
pub use config::FeatureConfig;
pub use error::{CoreError, CoreResult};
pub use features::{DESCRIPTOR_BYTES, Descriptor, Features, Keypoint, Match, hamming_distance};
pub use image::BinaryImage;
