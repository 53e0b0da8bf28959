//! Shared fixtures for the `game` submodule test suites.

use super::*;
use crate::state::Grid;

/// Builds a session from hand-drawn rows (top row first). The current layer's
/// player and ladder are read from the `@` and `H` tiles; when `@` is absent
/// the player is standing on the ladder.
pub(super) fn session_from_rows(current: &[&str], overworld: &[&str], climbing: bool) -> Game {
    let current_grid = grid(current);
    let ladder = find(&current_grid, TileKind::Ladder)
        .or_else(|| find(&current_grid, TileKind::Player))
        .expect("current fixture needs a ladder");
    let player = find(&current_grid, TileKind::Player).unwrap_or(ladder);
    let mut current_grid = current_grid;
    current_grid.set_tile(player, TileKind::Player);

    let overworld_grid = grid(overworld);
    let overworld_ladder =
        find(&overworld_grid, TileKind::Ladder).expect("overworld fixture needs a ladder");

    let config = GameConfig {
        width: current_grid.width(),
        height: current_grid.height(),
        ..GameConfig::default()
    };
    Game::from_parts(
        config,
        7,
        World { seed: 7, grid: current_grid, ladder, player },
        World { seed: 5, grid: overworld_grid, ladder: overworld_ladder, player: overworld_ladder },
        climbing,
    )
}

pub(super) fn grid(rows: &[&str]) -> Grid {
    Grid::from_rows(rows[0].len(), rows).expect("fixture rows should parse")
}

fn find(grid: &Grid, tile: TileKind) -> Option<Pos> {
    grid.positions_of(tile).next()
}

/// Walled 7x5 room with the player at (2, 2) and the ladder at (4, 2).
pub(super) const ROOM: [&str; 5] = [
    "#######",
    "#.....#",
    "#.@.H.#",
    "#.....#",
    "#######",
];

pub(super) const OVERWORLD: [&str; 5] = [
    "#######",
    "#.#...#",
    "#.#.H.#",
    "#.....#",
    "#######",
];
