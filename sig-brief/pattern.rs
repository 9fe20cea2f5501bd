use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Point pair offsets (dx1, dy1, dx2, dy2) relative to the keypoint
pub type PointPair = (i32, i32, i32, i32);

/// Number of comparisons per descriptor, one per bit
pub const PAIR_COUNT: usize = sig_core::DESCRIPTOR_BYTES * 8;

const PATTERN_SEED: u64 = 0x5EED_0F_B41E_F5EED;

/// Draw `PAIR_COUNT` distinct point pairs inside the disc of `radius` from
/// an isotropic Gaussian with sigma `radius / 2`. Same radius, same pattern.
pub fn sampling_pattern(radius: i32) -> Vec<PointPair> {
    let radius = radius.max(1);
    let mut rng = StdRng::seed_from_u64(PATTERN_SEED);
    let r_sq = radius * radius;
    let sigma = radius as f64 / 2.0;

    let point = |rng: &mut StdRng| loop {
        let dx: f64 = rng.sample(StandardNormal);
        let dy: f64 = rng.sample(StandardNormal);
        let (dx, dy) = ((dx * sigma).round() as i32, (dy * sigma).round() as i32);
        if dx * dx + dy * dy <= r_sq {
            return (dx, dy);
        }
    };

    let mut pairs = Vec::with_capacity(PAIR_COUNT);
    while pairs.len() < PAIR_COUNT {
        let (dx1, dy1) = point(&mut rng);
        let (dx2, dy2) = point(&mut rng);
        if (dx1, dy1) != (dx2, dy2) {
            pairs.push((dx1, dy1, dx2, dy2));
        }
    }
    pairs
}
