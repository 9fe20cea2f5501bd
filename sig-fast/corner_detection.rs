use rayon::prelude::*;
use sig_core::{BinaryImage, Keypoint};

use crate::types::CornerType;
use crate::utils::{circle_mask, has_consecutive_bits};

/// Corner detection algorithms (FAST segment test and Harris scoring)
pub struct CornerDetector;

impl CornerDetector {
    /// FAST circle offsets (Bresenham circle of radius 3), clockwise from the top
    pub const FAST_OFFSETS: [(i32, i32); 16] = [
        (0, -3), (1, -3), (2, -2), (3, -1),
        (3, 0), (3, 1), (2, 2), (1, 3),
        (0, 3), (-1, 3), (-2, 2), (-3, 1),
        (-3, 0), (-3, -1), (-2, -2), (-1, -3),
    ];

    /// Contiguous arc length required by FAST-9
    pub const ARC_LENGTH: usize = 9;

    /// Harris free parameter
    const HARRIS_K: f64 = 0.04;

    /// Scan every pixel at least `border` away from the edges and return the
    /// FAST corners, scored by Harris response, in row-major order.
    pub fn detect_candidates(img: &BinaryImage, border: usize, threshold: u8) -> Vec<Keypoint> {
        let (width, height) = img.dimensions();
        if width <= 2 * border || height <= 2 * border {
            return Vec::new();
        }

        (border..height - border)
            .into_par_iter()
            .flat_map_iter(|y| {
                (border..width - border).filter_map(move |x| {
                    if !Self::classify(img, x, y, threshold).is_corner() {
                        return None;
                    }
                    Some(Keypoint {
                        x: x as f32,
                        y: y as f32,
                        angle: 0.0,
                        response: Self::harris_response(img, x, y),
                    })
                })
            })
            .collect()
    }

    /// Segment test. Caller guarantees the circle lies inside the image.
    pub fn classify(img: &BinaryImage, x: usize, y: usize, threshold: u8) -> CornerType {
        let center = img.get(x, y) as i32;
        let t = threshold as i32;

        let mut brighter = [false; 16];
        let mut darker = [false; 16];
        for (i, &(dx, dy)) in Self::FAST_OFFSETS.iter().enumerate() {
            let px = (x as i32 + dx) as usize;
            let py = (y as i32 + dy) as usize;
            let pixel = img.get(px, py) as i32;
            brighter[i] = pixel > center + t;
            darker[i] = pixel < center - t;
        }

        if has_consecutive_bits(circle_mask(&brighter), Self::ARC_LENGTH) {
            CornerType::Bright
        } else if has_consecutive_bits(circle_mask(&darker), Self::ARC_LENGTH) {
            CornerType::Dark
        } else {
            CornerType::None
        }
    }

    /// Harris corner response over a 5x5 window, negative values clamped to 0.
    /// Returns 0 when the window does not fit.
    pub fn harris_response(img: &BinaryImage, x: usize, y: usize) -> f32 {
        let (width, height) = img.dimensions();
        if x < 3 || y < 3 || x + 3 >= width || y + 3 >= height {
            return 0.0;
        }

        let mut ixx = 0.0f64;
        let mut ixy = 0.0f64;
        let mut iyy = 0.0f64;

        for ny in y - 2..=y + 2 {
            for nx in x - 2..=x + 2 {
                let (gx, gy) = Self::sobel(img, nx, ny);
                ixx += gx * gx;
                ixy += gx * gy;
                iyy += gy * gy;
            }
        }

        let det = ixx * iyy - ixy * ixy;
        let trace = ixx + iyy;
        let response = det - Self::HARRIS_K * trace * trace;

        if response > 0.0 { response as f32 } else { 0.0 }
    }

    /// Sobel gradients, normalized by 8 and scaled to [0, 1] intensities
    fn sobel(img: &BinaryImage, x: usize, y: usize) -> (f64, f64) {
        let p = |xx: usize, yy: usize| img.get(xx, yy) as f64 / 255.0;

        let gx = p(x + 1, y - 1) + 2.0 * p(x + 1, y) + p(x + 1, y + 1)
            - p(x - 1, y - 1)
            - 2.0 * p(x - 1, y)
            - p(x - 1, y + 1);
        let gy = p(x - 1, y + 1) + 2.0 * p(x, y + 1) + p(x + 1, y + 1)
            - p(x - 1, y - 1)
            - 2.0 * p(x, y - 1)
            - p(x + 1, y - 1);

        (gx / 8.0, gy / 8.0)
    }
}
