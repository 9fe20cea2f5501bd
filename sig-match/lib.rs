//! Exhaustive nearest-neighbour matching of binary descriptors under
//! Hamming distance, with optional mutual (cross-check) agreement.

use std::convert::Infallible;

use rayon::prelude::*;
use sig_core::{Descriptor, DescriptorMatcher, Match, hamming_distance};

/// Index and distance of the closest descriptor in `train`; the lowest
/// index wins ties. `None` when `train` is empty.
pub fn nearest_neighbor(query: &Descriptor, train: &[Descriptor]) -> Option<(usize, u32)> {
    let mut best: Option<(usize, u32)> = None;
    for (idx, candidate) in train.iter().enumerate() {
        let distance = hamming_distance(query, candidate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => {
                best = Some((idx, distance));
                if distance == 0 {
                    break;
                }
            }
        }
    }
    best
}

/// Brute-force Hamming matcher
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceMatcher;

impl BruteForceMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Match every reference descriptor to its nearest test descriptor.
    /// With `cross_check`, keep only pairs that are each other's nearest
    /// neighbour. Output is ordered by reference index.
    pub fn match_all(&self, reference: &[Descriptor], test: &[Descriptor], cross_check: bool) -> Vec<Match> {
        if reference.is_empty() || test.is_empty() {
            return Vec::new();
        }

        let forward: Vec<(usize, u32)> = reference
            .par_iter()
            .filter_map(|query| nearest_neighbor(query, test))
            .collect();

        if !cross_check {
            return forward
                .into_iter()
                .enumerate()
                .map(|(reference_index, (test_index, distance))| Match {
                    reference_index,
                    test_index,
                    distance,
                })
                .collect();
        }

        let backward: Vec<usize> = test
            .par_iter()
            .filter_map(|query| nearest_neighbor(query, reference).map(|(idx, _)| idx))
            .collect();

        let matches: Vec<Match> = forward
            .into_iter()
            .enumerate()
            .filter(|&(reference_index, (test_index, _))| backward[test_index] == reference_index)
            .map(|(reference_index, (test_index, distance))| Match {
                reference_index,
                test_index,
                distance,
            })
            .collect();

        log::trace!(
            "cross-check kept {} of {} reference descriptors ({} test)",
            matches.len(),
            reference.len(),
            test.len()
        );
        matches
    }
}

impl DescriptorMatcher for BruteForceMatcher {
    type Error = Infallible;

    fn match_descriptors(
        &self,
        reference: &[Descriptor],
        test: &[Descriptor],
        cross_check: bool,
    ) -> Result<Vec<Match>, Infallible> {
        Ok(self.match_all(reference, test, cross_check))
    }
}
