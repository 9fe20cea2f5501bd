use std::cmp::Ordering;

use sig_core::{BinaryImage, Keypoint};

/// Keypoint filtering and orientation
pub struct KeypointRefinement;

impl KeypointRefinement {
    /// Strongest-first ordering; equal responses fall back to (y, x) so the
    /// result never depends on the input order.
    fn by_strength(a: &Keypoint, b: &Keypoint) -> Ordering {
        b.response
            .total_cmp(&a.response)
            .then(a.y.total_cmp(&b.y))
            .then(a.x.total_cmp(&b.x))
    }

    /// Greedy non-maximum suppression: accept the strongest remaining
    /// keypoint unless it lies within `min_distance` of one already
    /// accepted. Stops after `max_count` acceptances.
    pub fn non_maximum_suppression(
        keypoints: &[Keypoint],
        min_distance: f32,
        max_count: usize,
    ) -> Vec<Keypoint> {
        if keypoints.is_empty() || max_count == 0 {
            return Vec::new();
        }

        let mut sorted = keypoints.to_vec();
        sorted.sort_by(Self::by_strength);

        let min_distance_sq = min_distance * min_distance;
        let mut accepted: Vec<Keypoint> = Vec::with_capacity(max_count.min(sorted.len()));

        for candidate in sorted {
            let too_close = accepted.iter().any(|existing| {
                let dx = candidate.x - existing.x;
                let dy = candidate.y - existing.y;
                dx * dx + dy * dy < min_distance_sq
            });

            if !too_close {
                accepted.push(candidate);
                if accepted.len() == max_count {
                    break;
                }
            }
        }

        accepted
    }

    /// Orientation by intensity centroid over the disc of `radius` around
    /// (x, y). Samples outside the image are skipped.
    pub fn compute_orientation(img: &BinaryImage, x: f32, y: f32, radius: usize) -> f32 {
        let (width, height) = img.dimensions();
        let (cx, cy) = (x.round() as i64, y.round() as i64);
        let r = radius as i64;
        let r_sq = r * r;

        let mut m10 = 0i64;
        let mut m01 = 0i64;

        for dy in -r..=r {
            let yy = cy + dy;
            if yy < 0 || yy >= height as i64 {
                continue;
            }
            for dx in -r..=r {
                let xx = cx + dx;
                if xx < 0 || xx >= width as i64 || dx * dx + dy * dy > r_sq {
                    continue;
                }
                let val = img.get(xx as usize, yy as usize) as i64;
                m10 += dx * val;
                m01 += dy * val;
            }
        }

        if m10 == 0 && m01 == 0 {
            0.0
        } else {
            (m01 as f32).atan2(m10 as f32)
        }
    }
}
