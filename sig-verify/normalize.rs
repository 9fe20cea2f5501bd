use image::DynamicImage;
use sig_core::{BinaryImage, CoreError};
use thiserror::Error;

/// Default binarization cutoff: samples above it become paper (255)
pub const DEFAULT_THRESHOLD: u8 = 127;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Image has a zero dimension: {width}x{height}")]
    Empty { width: u32, height: u32 },
    #[error(transparent)]
    Image(#[from] CoreError),
}

/// Decode raw image bytes (format sniffed from the content), convert to
/// 8-bit luminance and binarize at `threshold`.
pub fn normalize(bytes: &[u8], threshold: u8) -> Result<BinaryImage, NormalizeError> {
    let decoded = image::load_from_memory(bytes)?;
    normalize_image(&decoded, threshold)
}

/// Luminance conversion and binarization of an already decoded image
pub fn normalize_image(img: &DynamicImage, threshold: u8) -> Result<BinaryImage, NormalizeError> {
    let gray = img.to_luma8();
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(NormalizeError::Empty { width, height });
    }
    Ok(BinaryImage::threshold(
        width as usize,
        height as usize,
        gray.as_raw(),
        threshold,
    )?)
}
