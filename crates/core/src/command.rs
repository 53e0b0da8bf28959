//! Command vocabulary, the input-string parser and the driver that applies
//! commands to an optional running session.
//!
//! Input strings use one character per command: `n<digits>s` starts a new
//! game, `w`/`a`/`s`/`d` move, `l` loads the saved game and `:q` saves and
//! quits. Letters are case-insensitive and ASCII whitespace is skipped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, GameConfig};
use crate::game::Game;
use crate::snapshot::SnapshotStore;
use crate::types::{Direction, MoveOutcome, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    NewGame(u64),
    Move(Direction),
    Load,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {found:?} at offset {offset}")]
    UnknownCommand { offset: usize, found: char },
    #[error("seed starting at offset {offset} is not terminated by 's'")]
    UnterminatedSeed { offset: usize },
    #[error("seed {digits:?} starting at offset {offset} is not a number")]
    InvalidSeed { offset: usize, digits: String },
    #[error("':' at offset {offset} must be followed by 'q'")]
    DanglingColon { offset: usize },
}

/// Parses a whole input string. Nothing is returned unless every command in
/// it is well formed.
pub fn parse_commands(input: &str) -> Result<Vec<Command>, CommandError> {
    let mut commands = Vec::new();
    let mut chars = input.char_indices().filter(|(_, c)| !c.is_ascii_whitespace());

    while let Some((offset, c)) = chars.next() {
        let command = match c.to_ascii_lowercase() {
            'n' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some((_, end)) if end.eq_ignore_ascii_case(&'s') => break,
                        Some((_, digit)) => digits.push(digit),
                        None => return Err(CommandError::UnterminatedSeed { offset }),
                    }
                }
                let valid = !digits.is_empty() && digits.chars().all(|d| d.is_ascii_digit());
                let seed = valid.then(|| digits.parse::<u64>().ok()).flatten();
                match seed {
                    Some(seed) => Command::NewGame(seed),
                    None => return Err(CommandError::InvalidSeed { offset, digits }),
                }
            }
            ':' => match chars.next() {
                Some((_, q)) if q.eq_ignore_ascii_case(&'q') => Command::Quit,
                _ => return Err(CommandError::DanglingColon { offset }),
            },
            'l' => Command::Load,
            other => match Direction::from_key(other) {
                Some(direction) => Command::Move(direction),
                None => return Err(CommandError::UnknownCommand { offset, found: c }),
            },
        };
        commands.push(command);
    }
    Ok(commands)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    Started { seed: u64 },
    Loaded { seed: u64 },
    /// The store could not produce a usable snapshot, so a fresh game was
    /// generated from the driver's fallback seed instead.
    LoadFellBack { seed: u64, reason: String },
    Moved { from: Pos, to: Pos },
    Blocked,
    /// A move arrived before any game was started or loaded.
    NoGame,
    Saved,
    SaveFailed { reason: String },
    /// Quit with nothing to save.
    QuitWithoutGame,
    /// The driver has already quit.
    Ignored,
}

/// What one command did, and whether the ladder check that follows every
/// command swapped the layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedCommand {
    pub command: Command,
    pub outcome: CommandOutcome,
    pub swapped: bool,
}

pub struct Driver<S> {
    config: GameConfig,
    store: S,
    fallback_seed: u64,
    game: Option<Game>,
    quit: bool,
}

impl<S: SnapshotStore> Driver<S> {
    pub fn new(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, store, fallback_seed: 0, game: None, quit: false })
    }

    /// Seed used when a load fails and a fresh game has to be generated.
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback_seed = seed;
        self
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn has_quit(&self) -> bool {
        self.quit
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn apply(&mut self, command: Command) -> AppliedCommand {
        if self.quit {
            return AppliedCommand { command, outcome: CommandOutcome::Ignored, swapped: false };
        }
        let outcome = match command {
            Command::NewGame(seed) => {
                self.game = Some(Game::new(seed, &self.config));
                CommandOutcome::Started { seed }
            }
            Command::Move(direction) => match self.game.as_mut() {
                None => CommandOutcome::NoGame,
                Some(game) => match game.move_player(direction) {
                    MoveOutcome::Moved { from, to } => CommandOutcome::Moved { from, to },
                    MoveOutcome::Blocked => CommandOutcome::Blocked,
                },
            },
            Command::Load => self.load(),
            Command::Quit => {
                self.quit = true;
                self.save()
            }
        };
        let swapped = self.game.as_mut().is_some_and(Game::tick);
        AppliedCommand { command, outcome, swapped }
    }

    pub fn run(&mut self, commands: impl IntoIterator<Item = Command>) -> Vec<AppliedCommand> {
        commands.into_iter().map(|command| self.apply(command)).collect()
    }

    fn load(&mut self) -> CommandOutcome {
        let restored = self
            .store
            .load()
            .and_then(|snapshot| Game::from_snapshot(&snapshot, &self.config));
        match restored {
            Ok(game) => {
                let seed = game.seed();
                log::info!("loaded saved game with seed {seed}");
                self.game = Some(game);
                CommandOutcome::Loaded { seed }
            }
            Err(err) => {
                let seed = self.fallback_seed;
                log::warn!("could not load saved game ({err}); starting seed {seed} instead");
                self.game = Some(Game::new(seed, &self.config));
                CommandOutcome::LoadFellBack { seed, reason: err.to_string() }
            }
        }
    }

    fn save(&mut self) -> CommandOutcome {
        let Some(game) = self.game.as_ref() else {
            return CommandOutcome::QuitWithoutGame;
        };
        match self.store.save(&game.snapshot()) {
            Ok(()) => {
                log::info!("saved game with seed {}", game.seed());
                CommandOutcome::Saved
            }
            Err(err) => {
                log::warn!("failed to save game: {err}");
                CommandOutcome::SaveFailed { reason: err.to_string() }
            }
        }
    }
}
