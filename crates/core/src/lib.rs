pub mod command;
pub mod config;
pub mod content;
pub mod game;
pub mod journal;
pub mod journal_file;
pub mod mapgen;
pub mod replay;
pub mod save_file;
pub mod snapshot;
pub mod state;
pub mod types;

pub use command::{AppliedCommand, Command, CommandError, CommandOutcome, Driver, parse_commands};
pub use config::{ConfigError, GameConfig};
pub use game::Game;
pub use journal::{CommandJournal, CommandRecord};
pub use replay::*;
pub use save_file::SaveFile;
pub use snapshot::{MemoryStore, Snapshot, SnapshotError, SnapshotStore};
pub use state::{Grid, RowsError, World};
pub use types::*;
