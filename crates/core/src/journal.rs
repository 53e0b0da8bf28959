use serde::{Deserialize, Serialize};

use crate::command::Command;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

/// Every command accepted by a driver, in order, plus what a replay needs to
/// reproduce the session: the seed a failed load falls back to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandJournal {
    pub format_version: u16,
    pub build_id: String,
    pub fallback_seed: u64,
    pub commands: Vec<CommandRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecord {
    pub seq: u64,
    pub command: Command,
}

impl CommandJournal {
    pub fn new(fallback_seed: u64) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: "dev".to_string(),
            fallback_seed,
            commands: Vec::new(),
        }
    }

    pub fn append(&mut self, command: Command) {
        let seq = self.commands.len() as u64;
        self.commands.push(CommandRecord { seq, command });
    }

    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.commands.iter().map(|record| record.command)
    }
}
