use crate::error::{CoreError, CoreResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Row-major single-channel image whose samples are exactly 0 or 255.
///
/// Ink (dark strokes) ends up as 0 and paper as 255 for the usual
/// dark-on-light signature scan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BinaryImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BinaryImage {
    pub const ON: u8 = 255;
    pub const OFF: u8 = 0;

    /// Binarize an 8-bit grayscale buffer: samples strictly above `cutoff`
    /// become 255, everything else 0.
    pub fn threshold(width: usize, height: usize, gray: &[u8], cutoff: u8) -> CoreResult<Self> {
        Self::check_dimensions(width, height, gray.len())?;
        let data = gray
            .iter()
            .map(|&v| if v > cutoff { Self::ON } else { Self::OFF })
            .collect();
        Ok(Self { width, height, data })
    }

    /// Wrap an already binary buffer, validating its shape and samples.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> CoreResult<Self> {
        Self::check_dimensions(width, height, data.len())?;
        if let Some((index, &value)) = data
            .iter()
            .enumerate()
            .find(|&(_, &v)| v != Self::ON && v != Self::OFF)
        {
            return Err(CoreError::NonBinarySample { index, value });
        }
        Ok(Self { width, height, data })
    }

    fn check_dimensions(width: usize, height: usize, len: usize) -> CoreResult<()> {
        if width == 0 || height == 0 {
            return Err(CoreError::EmptyImage { width, height });
        }
        let expected_len = width * height;
        if len != expected_len {
            return Err(CoreError::InvalidImageData {
                expected_len,
                actual_len: len,
            });
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Sample at (x, y). Panics when out of bounds, like slice indexing.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    /// Number of ink (0) samples.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == Self::OFF).count()
    }
}
