//! Single-step player movement on the active layer.

use super::*;

impl Game {
    /// Steps the player one tile. Walls and the grid edge block the move and
    /// leave the session untouched. A successful move disarms the ladder.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        let (dx, dy) = direction.delta();
        let from = self.current.player;
        let to = from.offset(dx, dy);
        let grid = &mut self.current.grid;
        if !grid.in_bounds(to) || grid.tile_at(to) == TileKind::Wall {
            return MoveOutcome::Blocked;
        }

        let vacated = if from == self.current.ladder { TileKind::Ladder } else { TileKind::Floor };
        grid.set_tile(from, vacated);
        grid.set_tile(to, TileKind::Player);
        self.current.player = to;
        self.climbing = false;
        MoveOutcome::Moved { from, to }
    }
}
