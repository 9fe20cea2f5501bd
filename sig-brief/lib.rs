//! Steered BRIEF: 256 intensity comparisons around each keypoint, rotated by
//! the keypoint orientation and taken on 5x5 box-smoothed samples.

mod integral;
mod pattern;

use rayon::prelude::*;
use sig_core::{BinaryImage, DESCRIPTOR_BYTES, Descriptor, Keypoint};

use crate::integral::IntegralImage;
pub use crate::pattern::{PAIR_COUNT, PointPair, sampling_pattern};

/// Half side of the smoothing box around each sample point
const SMOOTHING_HALF: i32 = 2;

pub struct BriefGenerator {
    pairs: Vec<PointPair>,
}

impl BriefGenerator {
    /// Pattern sized for a `patch_size` square patch. Sample points stay
    /// `SMOOTHING_HALF` inside the patch radius so every box fits the patch.
    pub fn new(patch_size: usize) -> Self {
        let radius = (patch_size as i32 / 2 - SMOOTHING_HALF).max(1);
        Self {
            pairs: sampling_pattern(radius),
        }
    }

    pub fn pairs(&self) -> &[PointPair] {
        &self.pairs
    }

    /// One descriptor per keypoint, in keypoint order.
    pub fn generate_descriptors(&self, img: &BinaryImage, kps: &[Keypoint]) -> Vec<Descriptor> {
        if kps.is_empty() {
            return Vec::new();
        }
        let integral = IntegralImage::new(img);
        kps.par_iter()
            .map(|kp| self.describe(&integral, kp))
            .collect()
    }

    fn describe(&self, integral: &IntegralImage, kp: &Keypoint) -> Descriptor {
        let (s, c) = kp.angle.sin_cos();
        let (cx, cy) = (kp.x, kp.y);
        let rotate = |dx: i32, dy: i32| {
            (
                (cx + c * dx as f32 - s * dy as f32).round() as i64,
                (cy + s * dx as f32 + c * dy as f32).round() as i64,
            )
        };
        let half = SMOOTHING_HALF as i64;

        let mut d = [0u8; DESCRIPTOR_BYTES];
        for (i, &(dx1, dy1, dx2, dy2)) in self.pairs.iter().enumerate() {
            let (x1, y1) = rotate(dx1, dy1);
            let (x2, y2) = rotate(dx2, dy2);
            let bit = (integral.box_sum(x1, y1, half) < integral.box_sum(x2, y2, half)) as u8;
            d[i / 8] |= bit << (i % 8);
        }
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::strategy::Strategy as _;
    use sig_core::hamming_distance;

    fn kp(x: f32, y: f32, angle: f32) -> Keypoint {
        Keypoint {
            x,
            y,
            angle,
            response: 1.0,
        }
    }

    /// Ink L-shape on paper, corner near the middle
    fn create_l_image(width: usize, height: usize) -> BinaryImage {
        let mut data = vec![255u8; width * height];
        for y in 10..height - 10 {
            for x in 20..24 {
                data[y * width + x] = 0;
            }
        }
        for y in height - 14..height - 10 {
            for x in 20..width - 10 {
                data[y * width + x] = 0;
            }
        }
        BinaryImage::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_one_descriptor_per_keypoint() {
        let generator = BriefGenerator::new(31);
        let img = create_l_image(60, 60);
        let kps = [kp(22.0, 30.0, 0.0), kp(30.0, 47.0, 1.0), kp(21.0, 46.0, -2.0)];
        let descs = generator.generate_descriptors(&img, &kps);
        assert_eq!(descs.len(), kps.len());
    }

    #[test]
    fn test_no_keypoints_no_descriptors() {
        let generator = BriefGenerator::new(31);
        let img = create_l_image(60, 60);
        assert!(generator.generate_descriptors(&img, &[]).is_empty());
    }

    #[test]
    fn test_descriptors_are_deterministic() {
        let img = create_l_image(60, 60);
        let kps = [kp(22.0, 30.0, 0.3), kp(22.0, 47.0, 2.0)];
        let a = BriefGenerator::new(31).generate_descriptors(&img, &kps);
        let b = BriefGenerator::new(31).generate_descriptors(&img, &kps);
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_patch_gives_zero_descriptor() {
        let img = BinaryImage::from_raw(40, 40, vec![255; 1600]).unwrap();
        let descs = BriefGenerator::new(15).generate_descriptors(&img, &[kp(20.0, 20.0, 0.7)]);
        assert_eq!(descs[0], [0u8; DESCRIPTOR_BYTES]);
    }

    #[test]
    fn test_structure_sets_bits() {
        let img = create_l_image(60, 60);
        let descs = BriefGenerator::new(31).generate_descriptors(&img, &[kp(22.0, 46.0, 0.0)]);
        assert!(descs[0].iter().any(|&b| b != 0));
    }

    #[test]
    fn test_translated_structure_gives_same_descriptor() {
        // Same L shifted by (5, 3): descriptor at the shifted keypoint is identical
        let width = 70;
        let height = 70;
        let base = create_l_image(width, height);
        let mut shifted = vec![255u8; width * height];
        for y in 0..height - 3 {
            for x in 0..width - 5 {
                shifted[(y + 3) * width + x + 5] = base.get(x, y);
            }
        }
        let shifted = BinaryImage::from_raw(width, height, shifted).unwrap();

        let generator = BriefGenerator::new(31);
        let a = generator.generate_descriptors(&base, &[kp(22.0, 40.0, 0.0)]);
        let b = generator.generate_descriptors(&shifted, &[kp(27.0, 43.0, 0.0)]);
        assert_eq!(hamming_distance(&a[0], &b[0]), 0);
    }

    fn arb_keypoint() -> impl proptest::strategy::Strategy<Value = Keypoint> {
        (-20.0f32..80.0, -20.0f32..80.0, -std::f32::consts::PI..std::f32::consts::PI)
            .prop_map(|(x, y, angle)| kp(x, y, angle))
    }


    proptest::proptest! {
        #[test]
        fn prop_each_descriptor_depends_only_on_its_keypoint(
            kps in proptest::collection::vec(arb_keypoint(), 0..12),
        ) {
            let generator = BriefGenerator::new(31);
            let img = create_l_image(60, 60);
            let descs = generator.generate_descriptors(&img, &kps);
            proptest::prop_assert_eq!(descs.len(), kps.len());
            for (kp, desc) in kps.iter().zip(&descs) {
                let alone = generator.generate_descriptors(&img, std::slice::from_ref(kp));
                proptest::prop_assert_eq!(&alone[0], desc);
            }
        }
    }
}
