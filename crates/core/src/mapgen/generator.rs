//! High-level layer generation that composes placement, wall passes and spawns.

use crate::config::GameConfig;
use crate::state::{Grid, World};
use crate::types::{Layer, TileKind};

use super::placement::{place_seed_room, place_system};
use super::seed::{layer_rng, layer_seed, uniform};
use super::spawns::spawn_marker;
use super::walls::{clean_seams, fill_void, place_walls};

pub struct WorldGenerator<'a> {
    config: &'a GameConfig,
}

impl<'a> WorldGenerator<'a> {
    pub fn new(config: &'a GameConfig) -> Self {
        Self { config }
    }

    /// Builds one layer. `seed` is the session seed; the layer's own seed is
    /// derived from it.
    pub fn generate(&self, seed: u64, layer: Layer) -> World {
        let config = self.config;
        let seed = layer_seed(seed, layer, config.overworld_seed_mask);
        let mut rng = layer_rng(seed);

        let max_attempts = i32::try_from(config.max_system_attempts).unwrap_or(i32::MAX);
        let attempts = uniform(&mut rng, 0, max_attempts);

        let mut grid = Grid::new(config.width, config.height);
        place_seed_room(&mut grid, &mut rng, config);
        let accepted = (0..attempts).filter(|_| place_system(&mut grid, &mut rng, config)).count();

        place_walls(&mut grid);
        let seams = clean_seams(&mut grid);
        if config.fill_void {
            fill_void(&mut grid);
        }

        let (player, ladder) = match layer {
            Layer::Floor => {
                let player = spawn_marker(&mut grid, &mut rng, TileKind::Player);
                (player, spawn_marker(&mut grid, &mut rng, TileKind::Ladder))
            }
            Layer::Overworld => {
                let ladder = spawn_marker(&mut grid, &mut rng, TileKind::Ladder);
                (ladder, ladder)
            }
        };

        log::debug!(
            "generated {layer:?} layer from seed {seed}: {accepted}/{attempts} systems, \
             {seams} seams opened, {} floor tiles",
            grid.count(TileKind::Floor),
        );

        World { seed, grid, ladder, player }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Pos;

    #[test]
    fn same_seed_and_layer_rebuild_the_same_world() {
        let config = GameConfig::default();
        let generator = WorldGenerator::new(&config);
        assert_eq!(generator.generate(77, Layer::Floor), generator.generate(77, Layer::Floor));
    }

    #[test]
    fn overworld_has_a_ladder_but_no_player() {
        let config = GameConfig::default();
        let world = WorldGenerator::new(&config).generate(5, Layer::Overworld);
        assert_eq!(world.seed, 5 ^ 2);
        assert_eq!(world.player, world.ladder, "arrival point is the ladder");
        assert_eq!(world.grid.count(TileKind::Player), 0);
        assert_eq!(world.grid.positions_of(TileKind::Ladder).collect::<Vec<Pos>>(), [world.ladder]);
    }

    #[test]
    fn current_layer_has_one_player_on_its_recorded_position() {
        let config = GameConfig::default();
        let world = WorldGenerator::new(&config).generate(5, Layer::Floor);
        let players: Vec<Pos> = world.grid.positions_of(TileKind::Player).collect();
        assert_eq!(players, [world.player]);
        assert_eq!(world.grid.tile_at(world.ladder), TileKind::Ladder);
        assert_ne!(world.player, world.ladder);
    }

    #[test]
    fn void_is_kept_when_fill_is_disabled() {
        let config = GameConfig { fill_void: false, ..GameConfig::default() };
        let world = WorldGenerator::new(&config).generate(9, Layer::Floor);
        assert!(world.grid.count(TileKind::Empty) > 0);

        let filled = WorldGenerator::new(&GameConfig::default()).generate(9, Layer::Floor);
        assert_eq!(filled.grid.count(TileKind::Empty), 0);
    }

    #[test]
    fn small_grids_still_generate() {
        let config = GameConfig { width: 8, height: 8, ..GameConfig::default() };
        config.validate().expect("8x8 is the minimum accepted size");
        let world = WorldGenerator::new(&config).generate(3, Layer::Floor);
        assert_eq!(world.grid.width(), 8);
        assert_eq!(world.grid.count(TileKind::Player), 1);
    }
}
