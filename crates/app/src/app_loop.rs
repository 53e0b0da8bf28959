//! Frame-by-frame key handling. Keys become core `Command`s; this module owns
//! only the menu and seed-entry states around a game.

use abyss_core::{AppliedCommand, Command, CommandOutcome, Direction, Driver, SnapshotStore};
use macroquad::prelude::KeyCode;

const DIGIT_KEYS: [(KeyCode, char); 10] = [
    (KeyCode::Key0, '0'),
    (KeyCode::Key1, '1'),
    (KeyCode::Key2, '2'),
    (KeyCode::Key3, '3'),
    (KeyCode::Key4, '4'),
    (KeyCode::Key5, '5'),
    (KeyCode::Key6, '6'),
    (KeyCode::Key7, '7'),
    (KeyCode::Key8, '8'),
    (KeyCode::Key9, '9'),
];

const MOVE_KEYS: [(KeyCode, Direction); 4] = [
    (KeyCode::W, Direction::Up),
    (KeyCode::A, Direction::Left),
    (KeyCode::S, Direction::Down),
    (KeyCode::D, Direction::Right),
];

#[derive(Debug, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Menu,
    /// Typing a seed after `N`; `S` starts the game, replacing any running one.
    SeedEntry { digits: String },
    /// `awaiting_quit` is set by `:` and consumed by the next key.
    Playing { awaiting_quit: bool },
    Quit,
}

#[derive(Default)]
pub struct AppState {
    pub mode: AppMode,
    /// Commands applied during the current frame's `tick()` call.
    pub applied: Vec<AppliedCommand>,
    /// One line about the most recent notable outcome, shown in the HUD.
    pub status: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_quit(&self) -> bool {
        self.mode == AppMode::Quit
    }

    /// Handle the keys pressed this frame. Keys are read in order, so one
    /// frame may both finish a seed and start moving.
    pub fn tick<S: SnapshotStore>(&mut self, driver: &mut Driver<S>, keys_pressed: &[KeyCode]) {
        self.applied.clear();
        for &key in keys_pressed {
            self.handle_key(driver, key);
        }
    }

    fn handle_key<S: SnapshotStore>(&mut self, driver: &mut Driver<S>, key: KeyCode) {
        match &mut self.mode {
            AppMode::Menu => match key {
                KeyCode::N => self.mode = AppMode::SeedEntry { digits: String::new() },
                KeyCode::L => {
                    self.apply(driver, Command::Load);
                    self.mode = AppMode::Playing { awaiting_quit: false };
                }
                KeyCode::Q => {
                    self.apply(driver, Command::Quit);
                    self.mode = AppMode::Quit;
                }
                _ => {}
            },
            AppMode::SeedEntry { digits } => match key {
                KeyCode::S => {
                    if let Ok(seed) = digits.parse::<u64>() {
                        self.apply(driver, Command::NewGame(seed));
                        self.mode = AppMode::Playing { awaiting_quit: false };
                    }
                }
                KeyCode::Backspace => {
                    digits.pop();
                }
                KeyCode::Escape => {
                    self.mode = if driver.game().is_some() {
                        AppMode::Playing { awaiting_quit: false }
                    } else {
                        AppMode::Menu
                    };
                }
                _ => {
                    if let Some(digit) = digit_for(key) {
                        digits.push(digit);
                        if digits.parse::<u64>().is_err() {
                            digits.pop();
                        }
                    }
                }
            },
            AppMode::Playing { awaiting_quit: true } => {
                if key == KeyCode::Q {
                    self.apply(driver, Command::Quit);
                    self.mode = AppMode::Quit;
                } else {
                    self.mode = AppMode::Playing { awaiting_quit: false };
                }
            }
            AppMode::Playing { awaiting_quit: false } => match key {
                KeyCode::Semicolon => self.mode = AppMode::Playing { awaiting_quit: true },
                KeyCode::N => self.mode = AppMode::SeedEntry { digits: String::new() },
                KeyCode::L => self.apply(driver, Command::Load),
                _ => {
                    if let Some(direction) = direction_for(key) {
                        self.apply(driver, Command::Move(direction));
                    }
                }
            },
            AppMode::Quit => {}
        }
    }

    fn apply<S: SnapshotStore>(&mut self, driver: &mut Driver<S>, command: Command) {
        let applied = driver.apply(command);
        log::debug!("{:?} -> {:?}", applied.command, applied.outcome);
        if let Some(line) = status_line(&applied) {
            self.status = Some(line);
        }
        self.applied.push(applied);
    }
}

/// The key a typed character stands for. Typed characters arrive in order,
/// unlike per-key pressed flags, so printable input is read from them.
pub fn key_for_char(typed: char) -> Option<KeyCode> {
    let key = match typed.to_ascii_lowercase() {
        ':' => KeyCode::Semicolon,
        'n' => KeyCode::N,
        'l' => KeyCode::L,
        'q' => KeyCode::Q,
        's' => KeyCode::S,
        digit @ '0'..='9' => return DIGIT_KEYS.iter().find(|(_, d)| *d == digit).map(|&(k, _)| k),
        other => return direction_key(other),
    };
    Some(key)
}

fn direction_key(typed: char) -> Option<KeyCode> {
    let direction = Direction::from_key(typed)?;
    MOVE_KEYS.iter().find(|(_, d)| *d == direction).map(|&(key, _)| key)
}

fn digit_for(key: KeyCode) -> Option<char> {
    DIGIT_KEYS.iter().find(|(code, _)| *code == key).map(|&(_, digit)| digit)
}

fn direction_for(key: KeyCode) -> Option<Direction> {
    MOVE_KEYS.iter().find(|(code, _)| *code == key).map(|&(_, direction)| direction)
}

fn status_line(applied: &AppliedCommand) -> Option<String> {
    let line = match &applied.outcome {
        CommandOutcome::Started { seed } => format!("Started seed {seed}"),
        CommandOutcome::Loaded { seed } => format!("Loaded seed {seed}"),
        CommandOutcome::LoadFellBack { seed, reason } => {
            format!("Load failed ({reason}); started seed {seed}")
        }
        CommandOutcome::SaveFailed { reason } => format!("Save failed: {reason}"),
        CommandOutcome::Saved => "Saved".to_string(),
        _ if applied.swapped => "You climb the ladder".to_string(),
        _ => return None,
    };
    Some(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_characters_map_to_their_keys() {
        assert_eq!(key_for_char(':'), Some(KeyCode::Semicolon));
        assert_eq!(key_for_char('W'), Some(KeyCode::W));
        assert_eq!(key_for_char('d'), Some(KeyCode::D));
        assert_eq!(key_for_char('7'), Some(KeyCode::Key7));
        assert_eq!(key_for_char('q'), Some(KeyCode::Q));
        assert_eq!(key_for_char('x'), None);
        assert_eq!(key_for_char(' '), None);
    }

    #[test]
    fn typed_order_is_kept() {
        let keys: Vec<KeyCode> = "w:q".chars().filter_map(key_for_char).collect();
        assert_eq!(keys, [KeyCode::W, KeyCode::Semicolon, KeyCode::Q]);
    }
}
