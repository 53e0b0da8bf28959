//! Seeded random stream helpers for map generation.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::types::Layer;

pub(crate) fn layer_rng(layer_seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(layer_seed)
}

/// The overworld is generated from the session seed with `mask` folded in.
pub fn layer_seed(seed: u64, layer: Layer, mask: u64) -> u64 {
    match layer {
        Layer::Floor => seed,
        Layer::Overworld => seed ^ mask,
    }
}

/// Uniform draw from `[lo, hi)`. An empty range yields `lo`.
pub(crate) fn uniform(rng: &mut ChaCha8Rng, lo: i32, hi: i32) -> i32 {
    if hi <= lo {
        return lo;
    }
    let span = (i64::from(hi) - i64::from(lo)) as u64;
    lo + (rng.next_u64() % span) as i32
}

pub(crate) fn coin(rng: &mut ChaCha8Rng) -> bool {
    rng.next_u64() >> 63 == 1
}
