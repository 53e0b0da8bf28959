use crate::config::GameConfig;
use crate::state::World;
use crate::types::*;

mod bootstrap;
mod floor_transition;
mod hash;
mod movement;

#[cfg(test)]
mod test_support;

/// A running session: the active layer, the layer waiting behind the ladder,
/// and whether the ladder trigger is armed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    config: GameConfig,
    seed: u64,
    current: World,
    overworld: World,
    // True right after a swap or a fresh generation, until the player moves.
    climbing: bool,
}

impl Game {
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current(&self) -> &World {
        &self.current
    }

    pub fn overworld(&self) -> &World {
        &self.overworld
    }

    pub fn player_pos(&self) -> Pos {
        self.current.player
    }

    pub fn is_climbing(&self) -> bool {
        self.climbing
    }

    pub fn ladder_state(&self) -> LadderState {
        if self.climbing { LadderState::Armed } else { LadderState::Exploring }
    }
}
