//! Deterministic key streams shared by the benches.

#![allow(dead_code)]

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Keys where `hot_prob` of accesses fall on the first `hot_fraction` of the universe.
pub fn hotset_keys(
    count: usize,
    universe: u64,
    hot_fraction: f64,
    hot_prob: f64,
    seed: u64,
) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let hot = ((universe as f64 * hot_fraction) as u64).max(1);
    (0..count)
        .map(|_| {
            if rng.random::<f64>() < hot_prob {
                rng.random_range(0..hot)
            } else {
                rng.random_range(hot..universe.max(hot + 1))
            }
        })
        .collect()
}

/// Uniform keys in `[0, universe)`.
pub fn uniform_keys(count: usize, universe: u64, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| rng.random_range(0..universe)).collect()
}
