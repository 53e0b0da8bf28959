//! Ladder-triggered layer swaps.
//! This module exists to keep the armed/exploring state machine in one place.
//! It does not own movement; see `movement.rs`.

use std::mem;

use super::*;

impl Game {
    /// Runs after every command. Swaps layers when the player stands on the
    /// current ladder and the trigger is not armed. Returns whether it swapped.
    pub fn tick(&mut self) -> bool {
        if self.climbing || self.current.player != self.current.ladder {
            return false;
        }
        self.swap_layers();
        true
    }

    /// Exchanges the two layers as a whole. The departing grid gets its
    /// ladder tile back, the player appears on the arriving layer's ladder and
    /// the trigger is armed until the next move.
    pub fn swap_layers(&mut self) {
        let departing = &mut self.current;
        let vacated =
            if departing.player == departing.ladder { TileKind::Ladder } else { TileKind::Floor };
        departing.grid.set_tile(departing.player, vacated);
        departing.player = departing.ladder;

        mem::swap(&mut self.current, &mut self.overworld);

        let arriving = &mut self.current;
        arriving.player = arriving.ladder;
        arriving.grid.set_tile(arriving.ladder, TileKind::Player);
        self.climbing = true;

        log::info!(
            "swapped to layer seed {} at ladder {:?}",
            self.current.seed,
            self.current.ladder,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::*;

    fn on_ladder(climbing: bool) -> Game {
        let rows = ["#######", "#.....#", "#..@..#", "#######"];
        session_from_rows(&rows, &OVERWORLD, climbing)
    }

    #[test]
    fn disarmed_ladder_swaps_exactly_once() {
        let mut game = on_ladder(false);
        let prior_current = game.current().grid.clone();
        let prior_overworld = game.overworld().grid.clone();
        let overworld_ladder = game.overworld().ladder;

        assert!(game.tick());
        assert_eq!(game.ladder_state(), LadderState::Armed);
        assert_eq!(game.player_pos(), overworld_ladder);

        let mut expected = prior_overworld;
        expected.set_tile(overworld_ladder, TileKind::Player);
        assert_eq!(game.current().grid, expected);

        let mut departed = prior_current;
        departed.set_tile(game.overworld().ladder, TileKind::Ladder);
        assert_eq!(game.overworld().grid, departed);
        assert_eq!(game.overworld().grid.count(TileKind::Player), 0);

        assert!(!game.tick(), "armed ladder must not swap back");
    }

    #[test]
    fn armed_ladder_does_not_swap() {
        let mut game = on_ladder(true);
        let before = game.clone();
        assert!(!game.tick());
        assert_eq!(game, before);
    }

    #[test]
    fn off_ladder_tick_is_a_no_op() {
        let mut game = session_from_rows(&ROOM, &OVERWORLD, false);
        let before = game.clone();
        assert!(!game.tick());
        assert_eq!(game, before);
    }

    #[test]
    fn stepping_off_and_back_on_swaps_back() {
        let mut game = on_ladder(false);
        let seed_before = game.current().seed;
        assert!(game.tick());

        game.move_player(Direction::Right);
        assert!(!game.tick());
        game.move_player(Direction::Left);
        assert!(game.tick());
        assert_eq!(game.current().seed, seed_before);
        assert_eq!(game.current().grid.count(TileKind::Player), 1);
        assert_eq!(game.current().grid.count(TileKind::Ladder), 0);
        assert_eq!(game.overworld().grid.count(TileKind::Ladder), 1);
    }

    #[test]
    fn seeds_and_ladders_travel_with_their_grids() {
        let mut game = on_ladder(false);
        let (current_seed, overworld_seed) = (game.current().seed, game.overworld().seed);
        let (current_ladder, overworld_ladder) = (game.current().ladder, game.overworld().ladder);
        game.swap_layers();
        assert_eq!(game.current().seed, overworld_seed);
        assert_eq!(game.overworld().seed, current_seed);
        assert_eq!(game.current().ladder, overworld_ladder);
        assert_eq!(game.overworld().ladder, current_ladder);
    }
}
