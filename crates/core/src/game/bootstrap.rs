//! Session construction from a seed or from already-built layers.
//! This module exists to keep layer generation wiring out of the movement code.
//! It does not own snapshot validation; see `crate::snapshot`.

use super::*;
use crate::mapgen::WorldGenerator;

impl Game {
    /// Generates both layers. The current layer comes from `seed`, the
    /// overworld from `seed` with the configured mask folded in. The ladder
    /// starts armed so standing on the spawn ladder does not swap at once.
    pub fn new(seed: u64, config: &GameConfig) -> Self {
        let generator = WorldGenerator::new(config);
        let current = generator.generate(seed, Layer::Floor);
        let overworld = generator.generate(seed, Layer::Overworld);
        log::info!(
            "new game from seed {seed}: player at {:?}, ladder at {:?}",
            current.player,
            current.ladder,
        );
        Self { config: config.clone(), seed, current, overworld, climbing: true }
    }

    /// Installs layers that were validated elsewhere.
    pub(crate) fn from_parts(
        config: GameConfig,
        seed: u64,
        current: World,
        overworld: World,
        climbing: bool,
    ) -> Self {
        Self { config, seed, current, overworld, climbing }
    }
}
