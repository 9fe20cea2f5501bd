use crate::error::{CoreError, CoreResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of bytes in a binary descriptor.
pub const DESCRIPTOR_BYTES: usize = 32;

/// 256-bit binary descriptor = 32 bytes
pub type Descriptor = [u8; DESCRIPTOR_BYTES];

/// Key-point ≙ FAST corner + orientation (radians) + corner response
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub response: f32,
}

/// Count of differing bits between two descriptors.
#[inline]
pub fn hamming_distance(a: &Descriptor, b: &Descriptor) -> u32 {
    a.chunks_exact(8)
        .zip(b.chunks_exact(8))
        .map(|(ca, cb)| {
            let mut wa = [0u8; 8];
            let mut wb = [0u8; 8];
            wa.copy_from_slice(ca);
            wb.copy_from_slice(cb);
            (u64::from_le_bytes(wa) ^ u64::from_le_bytes(wb)).count_ones()
        })
        .sum()
}

/// Correspondence between one reference descriptor and one test descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Match {
    pub reference_index: usize,
    pub test_index: usize,
    pub distance: u32,
}

/// Keypoints with their descriptors, aligned by index.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Features {
    keypoints: Vec<Keypoint>,
    descriptors: Vec<Descriptor>,
}

impl Features {
    pub fn new(keypoints: Vec<Keypoint>, descriptors: Vec<Descriptor>) -> CoreResult<Self> {
        if keypoints.len() != descriptors.len() {
            return Err(CoreError::LengthMismatch {
                keypoints: keypoints.len(),
                descriptors: descriptors.len(),
            });
        }
        Ok(Self {
            keypoints,
            descriptors,
        })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn keypoints(&self) -> &[Keypoint] {
        &self.keypoints
    }

    pub fn descriptors(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.keypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypoints.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Keypoint>, Vec<Descriptor>) {
        (self.keypoints, self.descriptors)
    }
}
