//! Versioned save format for a running session.
//!
//! A snapshot stores both layers verbatim, so a restored session continues
//! from the exact tile state instead of regenerating from the seed.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::game::Game;
use crate::state::{Grid, RowsError, World};
use crate::types::{Layer, Pos, TileKind};

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Grid as rows of tile codes, top row first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GridRecord {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub format_version: u32,
    pub seed: u64,
    pub current_seed: u64,
    pub overworld_seed: u64,
    pub current_grid: GridRecord,
    pub overworld_grid: GridRecord,
    pub player_position: Pos,
    pub ladder_position: Pos,
    pub overworld_ladder_position: Pos,
    pub climbing: bool,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("no snapshot has been saved")]
    Missing,
    #[error("unsupported snapshot format version {0}")]
    UnsupportedVersion(u32),
    #[error("{layer:?} grid is {width}x{height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        layer: Layer,
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },
    #[error("{layer:?} grid row {row} has invalid tile code {code:?} at column {column}")]
    InvalidTile { layer: Layer, row: usize, column: usize, code: char },
    #[error("{layer:?} grid holds {found} player tiles where the session expects {expected}")]
    PlayerMismatch { layer: Layer, found: usize, expected: usize },
    #[error("player position {0:?} does not hold the player tile")]
    MisplacedPlayer(Pos),
    #[error("{layer:?} ladder position {pos:?} does not hold a ladder")]
    MisplacedLadder { layer: Layer, pos: Pos },
}

impl Snapshot {
    pub fn encode(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn decode(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl GridRecord {
    fn from_grid(grid: &Grid) -> Self {
        Self { width: grid.width(), height: grid.height(), rows: grid.to_rows() }
    }

    fn to_grid(&self, layer: Layer, config: &GameConfig) -> Result<Grid, SnapshotError> {
        let mismatch = || SnapshotError::DimensionMismatch {
            layer,
            width: self.width,
            height: self.height,
            expected_width: config.width,
            expected_height: config.height,
        };
        if self.width != config.width || self.height != config.height {
            return Err(mismatch());
        }
        if self.rows.len() != self.height {
            return Err(mismatch());
        }
        Grid::from_rows(self.width, &self.rows).map_err(|err| match err {
            RowsError::RaggedRow { .. } => mismatch(),
            RowsError::InvalidTile { row, column, code } => {
                SnapshotError::InvalidTile { layer, row, column, code }
            }
        })
    }
}

impl Game {
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            seed: self.seed(),
            current_seed: self.current().seed,
            overworld_seed: self.overworld().seed,
            current_grid: GridRecord::from_grid(&self.current().grid),
            overworld_grid: GridRecord::from_grid(&self.overworld().grid),
            player_position: self.player_pos(),
            ladder_position: self.current().ladder,
            overworld_ladder_position: self.overworld().ladder,
            climbing: self.is_climbing(),
        }
    }

    /// Rebuilds a session from a snapshot, checking that grid sizes match
    /// `config` and that the player and both ladders sit where recorded.
    pub fn from_snapshot(snapshot: &Snapshot, config: &GameConfig) -> Result<Self, SnapshotError> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.format_version));
        }
        let current_grid = snapshot.current_grid.to_grid(Layer::Floor, config)?;
        let overworld_grid = snapshot.overworld_grid.to_grid(Layer::Overworld, config)?;

        let players = current_grid.count(TileKind::Player);
        if players != 1 {
            return Err(SnapshotError::PlayerMismatch {
                layer: Layer::Floor,
                found: players,
                expected: 1,
            });
        }
        let player = snapshot.player_position;
        if current_grid.tile_at(player) != TileKind::Player {
            return Err(SnapshotError::MisplacedPlayer(player));
        }
        let stray = overworld_grid.count(TileKind::Player);
        if stray != 0 {
            return Err(SnapshotError::PlayerMismatch {
                layer: Layer::Overworld,
                found: stray,
                expected: 0,
            });
        }

        let ladder = snapshot.ladder_position;
        let under_ladder = current_grid.tile_at(ladder);
        let ladder_ok = under_ladder == TileKind::Ladder
            || (ladder == player && under_ladder == TileKind::Player);
        if !ladder_ok {
            return Err(SnapshotError::MisplacedLadder { layer: Layer::Floor, pos: ladder });
        }
        let overworld_ladder = snapshot.overworld_ladder_position;
        if overworld_grid.tile_at(overworld_ladder) != TileKind::Ladder {
            return Err(SnapshotError::MisplacedLadder {
                layer: Layer::Overworld,
                pos: overworld_ladder,
            });
        }

        let current =
            World { seed: snapshot.current_seed, grid: current_grid, ladder, player };
        let overworld = World {
            seed: snapshot.overworld_seed,
            grid: overworld_grid,
            ladder: overworld_ladder,
            player: overworld_ladder,
        };
        Ok(Game::from_parts(config.clone(), snapshot.seed, current, overworld, snapshot.climbing))
    }
}

/// Somewhere a snapshot can be saved to and loaded back from.
pub trait SnapshotStore {
    fn load(&mut self) -> Result<Snapshot, SnapshotError>;
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &mut S {
    fn load(&mut self) -> Result<Snapshot, SnapshotError> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        (**self).save(snapshot)
    }
}

/// Keeps the encoded snapshot in memory. Used by replays and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    encoded: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts out holding `encoded` verbatim, valid or not.
    pub fn with_contents(encoded: impl Into<String>) -> Self {
        Self { encoded: Some(encoded.into()) }
    }

    pub fn contents(&self) -> Option<&str> {
        self.encoded.as_deref()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&mut self) -> Result<Snapshot, SnapshotError> {
        let encoded = self.encoded.as_deref().ok_or(SnapshotError::Missing)?;
        Snapshot::decode(encoded)
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        self.encoded = Some(snapshot.encode()?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Direction;

    fn small_config() -> GameConfig {
        GameConfig { width: 30, height: 16, ..GameConfig::default() }
    }

    #[test]
    fn restored_session_continues_identically() {
        let config = small_config();
        let mut game = Game::new(31, &config);
        for direction in [Direction::Up, Direction::Right, Direction::Down] {
            game.move_player(direction);
            game.tick();
        }

        let encoded = game.snapshot().encode().expect("encode");
        let snapshot = Snapshot::decode(&encoded).expect("decode");
        let mut restored = Game::from_snapshot(&snapshot, &config).expect("restore");
        assert_eq!(restored, game);

        for direction in [Direction::Left, Direction::Left, Direction::Up] {
            assert_eq!(restored.move_player(direction), game.move_player(direction));
            assert_eq!(restored.tick(), game.tick());
        }
        assert_eq!(restored.snapshot_hash(), game.snapshot_hash());
    }

    #[test]
    fn future_versions_are_refused() {
        let config = small_config();
        let mut snapshot = Game::new(1, &config).snapshot();
        snapshot.format_version = 2;
        assert!(matches!(
            Game::from_snapshot(&snapshot, &config),
            Err(SnapshotError::UnsupportedVersion(2))
        ));
    }

    #[test]
    fn grid_size_must_match_the_config() {
        let snapshot = Game::new(1, &small_config()).snapshot();
        let err = Game::from_snapshot(&snapshot, &GameConfig::default()).unwrap_err();
        assert!(matches!(err, SnapshotError::DimensionMismatch { layer: Layer::Floor, .. }));

        let mut ragged = snapshot.clone();
        ragged.overworld_grid.rows[3].push('#');
        let err = Game::from_snapshot(&ragged, &small_config()).unwrap_err();
        assert!(matches!(err, SnapshotError::DimensionMismatch { layer: Layer::Overworld, .. }));
    }

    #[test]
    fn unknown_tile_codes_are_reported_with_their_location() {
        let config = small_config();
        let mut snapshot = Game::new(1, &config).snapshot();
        snapshot.current_grid.rows[0].replace_range(0..1, "?");
        let err = Game::from_snapshot(&snapshot, &config).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::InvalidTile { layer: Layer::Floor, row: 0, column: 0, code: '?' }
        ));
    }

    #[test]
    fn player_and_ladders_must_be_where_recorded() {
        let config = small_config();
        let snapshot = Game::new(1, &config).snapshot();

        let mut moved = snapshot.clone();
        moved.player_position = moved.ladder_position;
        assert!(matches!(
            Game::from_snapshot(&moved, &config),
            Err(SnapshotError::MisplacedPlayer(_))
        ));

        let mut lost_ladder = snapshot.clone();
        lost_ladder.overworld_ladder_position = Pos { y: 0, x: 0 };
        assert!(matches!(
            Game::from_snapshot(&lost_ladder, &config),
            Err(SnapshotError::MisplacedLadder { layer: Layer::Overworld, .. })
        ));

        let mut doubled = snapshot;
        let row = &mut doubled.overworld_grid.rows[0];
        row.replace_range(0..1, "@");
        assert!(matches!(
            Game::from_snapshot(&doubled, &config),
            Err(SnapshotError::PlayerMismatch { layer: Layer::Overworld, found: 1, .. })
        ));
    }

    #[test]
    fn memory_store_reports_missing_and_corrupt_contents() {
        let mut empty = MemoryStore::new();
        assert!(matches!(empty.load(), Err(SnapshotError::Missing)));

        let mut corrupt = MemoryStore::with_contents("{ not json");
        assert!(matches!(corrupt.load(), Err(SnapshotError::Json(_))));

        let snapshot = Game::new(4, &small_config()).snapshot();
        empty.save(&snapshot).expect("save");
        assert_eq!(empty.load().expect("load"), snapshot);
    }
}
