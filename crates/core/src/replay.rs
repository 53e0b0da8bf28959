use crate::{
    command::{Command, Driver},
    config::{ConfigError, GameConfig},
    journal::CommandJournal,
    snapshot::SnapshotStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayResult {
    /// `None` when no command ever started or loaded a game.
    pub snapshot_hash: Option<u64>,
    pub quit: bool,
    pub swaps: usize,
}

/// Feeds `commands` through a fresh driver backed by `store`. A failed load
/// falls back to seed 0.
pub fn replay_commands<S: SnapshotStore>(
    config: &GameConfig,
    commands: impl IntoIterator<Item = Command>,
    store: S,
) -> Result<ReplayResult, ConfigError> {
    replay_with_fallback(config, commands, store, 0)
}

/// Replays a recorded journal, using its recorded fallback seed.
pub fn replay_journal<S: SnapshotStore>(
    config: &GameConfig,
    journal: &CommandJournal,
    store: S,
) -> Result<ReplayResult, ConfigError> {
    replay_with_fallback(config, journal.commands(), store, journal.fallback_seed)
}

fn replay_with_fallback<S: SnapshotStore>(
    config: &GameConfig,
    commands: impl IntoIterator<Item = Command>,
    store: S,
    fallback_seed: u64,
) -> Result<ReplayResult, ConfigError> {
    let mut driver = Driver::new(config.clone(), store)?.with_fallback_seed(fallback_seed);
    let swaps = driver.run(commands).iter().filter(|applied| applied.swapped).count();
    Ok(ReplayResult {
        snapshot_hash: driver.game().map(|game| game.snapshot_hash()),
        quit: driver.has_quit(),
        swaps,
    })
}
