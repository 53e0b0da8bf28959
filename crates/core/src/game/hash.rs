//! Stable session hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from the state machine.
//! It does not own replay execution or snapshot persistence.

use std::hash::Hasher;

use super::*;
use xxhash_rust::xxh3::Xxh3;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u8(u8::from(self.climbing));
        for world in [&self.current, &self.overworld] {
            hasher.write_u64(world.seed);
            hasher.write_i32(world.player.x);
            hasher.write_i32(world.player.y);
            hasher.write_i32(world.ladder.x);
            hasher.write_i32(world.ladder.y);
            hasher.write_usize(world.grid.width());
            hasher.write_usize(world.grid.height());
            for tile in world.grid.tiles() {
                hasher.write_u8(*tile as u8);
            }
        }
        hasher.finish()
    }
}
