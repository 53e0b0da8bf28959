//! Random room and corridor extents.

use rand_chacha::ChaCha8Rng;

use super::seed::{coin, uniform};
use crate::config::GameConfig;
use crate::types::ShapeVector;

/// Both sides uniform in `[2, max_extent)`.
pub(crate) fn random_room(rng: &mut ChaCha8Rng, max_extent: i32) -> ShapeVector {
    let dx = uniform(rng, 2, max_extent);
    let dy = uniform(rng, 2, max_extent);
    ShapeVector { dx, dy }
}

/// One-tile-wide passage. A coin picks the orientation; the length axis is
/// resampled until it is a real corridor length.
pub(crate) fn random_hall(rng: &mut ChaCha8Rng, config: &GameConfig) -> ShapeVector {
    let vertical = coin(rng);
    let mut length: i32 = 0;
    while length == 0 || length.abs() == 1 {
        length = uniform(rng, config.hall_min_length, config.hall_max_length);
    }
    if vertical { ShapeVector { dx: 1, dy: length } } else { ShapeVector { dx: length, dy: 1 } }
}
