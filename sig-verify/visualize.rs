use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut};
use sig_core::{BinaryImage, Keypoint};

use crate::pipeline::Verification;

const CIRCLE_RADIUS: i32 = 4;

const PALETTE: [Rgb<u8>; 6] = [
    Rgb([230, 25, 75]),
    Rgb([60, 180, 75]),
    Rgb([0, 130, 200]),
    Rgb([245, 130, 48]),
    Rgb([145, 30, 180]),
    Rgb([70, 240, 240]),
];

fn blit(canvas: &mut RgbImage, img: &BinaryImage, x_offset: u32) {
    for y in 0..img.height() {
        for x in 0..img.width() {
            let v = img.get(x, y);
            canvas.put_pixel(x as u32 + x_offset, y as u32, Rgb([v, v, v]));
        }
    }
}

fn center(kp: &Keypoint, x_offset: u32) -> (f32, f32) {
    (kp.x + x_offset as f32, kp.y)
}

/// Reference and test images side by side with one coloured line per
/// match. Unmatched keypoints are not drawn.
pub fn draw_matches(verification: &Verification) -> RgbImage {
    let reference = &verification.reference;
    let test = &verification.test;
    let (ref_w, ref_h) = reference.image.dimensions();
    let (test_w, test_h) = test.image.dimensions();

    let offset = ref_w as u32;
    let mut canvas = RgbImage::new(offset + test_w as u32, ref_h.max(test_h) as u32);
    blit(&mut canvas, &reference.image, 0);
    blit(&mut canvas, &test.image, offset);

    let reference_kps = reference.features.keypoints();
    let test_kps = test.features.keypoints();
    for (i, m) in verification.matches.iter().enumerate() {
        let (Some(a), Some(b)) = (reference_kps.get(m.reference_index), test_kps.get(m.test_index)) else {
            log::warn!(
                "skipping match ({}, {}) with out-of-range index",
                m.reference_index,
                m.test_index
            );
            continue;
        };
        let color = PALETTE[i % PALETTE.len()];
        let start = center(a, 0);
        let end = center(b, offset);
        draw_line_segment_mut(&mut canvas, start, end, color);
        draw_hollow_circle_mut(&mut canvas, (start.0 as i32, start.1 as i32), CIRCLE_RADIUS, color);
        draw_hollow_circle_mut(&mut canvas, (end.0 as i32, end.1 as i32), CIRCLE_RADIUS, color);
    }
    canvas
}

/// Render [`draw_matches`] and save it; format follows the extension
pub fn save_matches<P: AsRef<Path>>(verification: &Verification, path: P) -> ImageResult<()> {
    draw_matches(verification).save(path)
}
