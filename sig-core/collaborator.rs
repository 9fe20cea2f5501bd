use crate::features::{Descriptor, Features, Match};
use crate::image::BinaryImage;

/// Finds salient points in a binary image and describes each with a
/// fixed-length binary descriptor.
///
/// Implementations must be deterministic: the same image always yields the
/// same keypoints and descriptors in the same order. A featureless image
/// yields `Features::empty()`, not an error.
pub trait FeatureExtractor: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn extract(&self, image: &BinaryImage) -> Result<Features, Self::Error>;
}

/// Pairs up two descriptor sets under Hamming distance.
///
/// With `cross_check`, a pair (i, j) is returned only when `test[j]` is the
/// nearest neighbour of `reference[i]` and `reference[i]` is the nearest
/// neighbour of `test[j]`; ties go to the lowest index. Either side empty
/// gives an empty result.
pub trait DescriptorMatcher: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn match_descriptors(
        &self,
        reference: &[Descriptor],
        test: &[Descriptor],
        cross_check: bool,
    ) -> Result<Vec<Match>, Self::Error>;
}

impl<T: FeatureExtractor + ?Sized> FeatureExtractor for &T {
    type Error = T::Error;

    fn extract(&self, image: &BinaryImage) -> Result<Features, Self::Error> {
        (**self).extract(image)
    }
}

impl<T: DescriptorMatcher + ?Sized> DescriptorMatcher for &T {
    type Error = T::Error;

    fn match_descriptors(
        &self,
        reference: &[Descriptor],
        test: &[Descriptor],
        cross_check: bool,
    ) -> Result<Vec<Match>, Self::Error> {
        (**self).match_descriptors(reference, test, cross_check)
    }
}
