//! Player and ladder placement on a finished floor plan.

use rand_chacha::ChaCha8Rng;

use super::seed::uniform;
use crate::state::Grid;
use crate::types::{Pos, TileKind};

/// Tries the central third of the map first, then keeps sampling the whole
/// grid until it hits floor, and stamps `marker` there.
///
/// # Panics
///
/// Panics if the grid has no floor tile; the loop below could never end.
/// Generated grids always contain the seed room.
pub(crate) fn spawn_marker(grid: &mut Grid, rng: &mut ChaCha8Rng, marker: TileKind) -> Pos {
    assert!(grid.count(TileKind::Floor) > 0, "cannot place {marker:?} on a grid without floor");

    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let mut pos = Pos {
        x: uniform(rng, width / 3, 2 * width / 3),
        y: uniform(rng, height / 3, 2 * height / 3),
    };
    while grid.tile_at(pos) != TileKind::Floor {
        pos = Pos { x: uniform(rng, 0, width), y: uniform(rng, 0, height) };
    }
    grid.set_tile(pos, marker);
    pos
}
