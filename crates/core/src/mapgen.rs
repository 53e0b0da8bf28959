//! Procedural layer generation split into coherent submodules.

mod generator;
mod placement;
mod seed;
mod shapes;
mod spawns;
mod walls;

pub use generator::WorldGenerator;
pub use placement::{carve, inner_span, is_border_tile, is_connected, is_placeable};
pub use seed::layer_seed;
pub use walls::{clean_seams, encircle, fill_void, place_walls};

use crate::config::GameConfig;
use crate::state::World;
use crate::types::Layer;

pub fn generate_world(seed: u64, layer: Layer, config: &GameConfig) -> World {
    WorldGenerator::new(config).generate(seed, layer)
}
