//! Append-only JSONL command log with a SHA-256 hash chain.
//!
//! Line 1 is a header (`format_version`, `build_id`, `fallback_seed`). Every
//! following line is one command with `prev_sha256_hex` and `sha256_hex`,
//! where each hash covers the record body plus the previous hash. A record
//! is flushed as soon as it is appended, so a crash loses at most the line
//! being written, and the loader stops at the first line that fails to
//! parse or breaks the chain.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::command::Command;
use crate::journal::{CommandJournal, CommandRecord, JOURNAL_FORMAT_VERSION};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
struct FileHeader {
    format_version: u16,
    build_id: String,
    fallback_seed: u64,
}

/// The hashed part of a record.
#[derive(Serialize)]
struct RecordBody {
    seq: u64,
    command: Command,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    command: Command,
    prev_sha256_hex: String,
    sha256_hex: String,
}

/// Previous-hash of the first record.
const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

fn chain_hash(body: &RecordBody, prev_sha256_hex: &str) -> Result<String, serde_json::Error> {
    let body_json = serde_json::to_string(body)?;
    let mut hasher = Sha256::new();
    hasher.update(body_json.as_bytes());
    hasher.update(prev_sha256_hex.as_bytes());
    Ok(format!("{:064x}", hasher.finalize()))
}

/// Each line goes out in a single `write_all`, and the chain only advances
/// once that write succeeds, so a failed append can be retried.
pub struct JournalWriter {
    file: File,
    last_sha256_hex: String,
    next_seq: u64,
}

impl JournalWriter {
    /// Creates (or truncates) the file and writes the header line.
    pub fn create(path: &Path, fallback_seed: u64, build_id: &str) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;

        let header = FileHeader {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: build_id.to_string(),
            fallback_seed,
        };
        let header_json = serde_json::to_string(&header).map_err(io::Error::other)?;
        file.write_all(format!("{header_json}\n").as_bytes())?;

        Ok(Self { file, last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 })
    }

    /// Continues a journal previously read with [`load_journal_from_file`].
    pub fn resume(path: &Path, loaded: &LoadedJournal) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self {
            file,
            last_sha256_hex: loaded.last_sha256_hex.clone(),
            next_seq: loaded.next_seq,
        })
    }

    pub fn append(&mut self, command: Command) -> io::Result<()> {
        let body = RecordBody { seq: self.next_seq, command };
        let sha256_hex = chain_hash(&body, &self.last_sha256_hex).map_err(io::Error::other)?;
        let record = FileRecord {
            seq: body.seq,
            command,
            prev_sha256_hex: self.last_sha256_hex.clone(),
            sha256_hex,
        };

        let record_json = serde_json::to_string(&record).map_err(io::Error::other)?;
        self.file.write_all(format!("{record_json}\n").as_bytes())?;

        self.last_sha256_hex = record.sha256_hex;
        self.next_seq += 1;
        Ok(())
    }
}

/// A verified journal plus the chain state needed to keep appending to it.
#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: CommandJournal,
    pub last_sha256_hex: String,
    pub next_seq: u64,
}

/// Line numbers are 1-based; the header is line 1.
#[derive(Debug, Error)]
pub enum JournalLoadError {
    #[error("journal I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("journal file is empty")]
    EmptyFile,
    #[error("invalid journal header at line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
    #[error("invalid journal record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
    #[error("incomplete journal line at line {line}")]
    IncompleteLine { line: usize },
    #[error("SHA-256 hash chain broken at line {line}")]
    HashChainBroken { line: usize },
}

pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    let mut journal = CommandJournal {
        format_version: header.format_version,
        build_id: header.build_id,
        fallback_seed: header.fallback_seed,
        commands: Vec::new(),
    };

    let mut prev_sha256_hex = INITIAL_HASH.to_string();
    for (index, line) in lines.iter().enumerate().skip(1) {
        let line_number = index + 1;
        let invalid =
            |message: String| JournalLoadError::InvalidRecord { line: line_number, message };

        let record: FileRecord =
            serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        let expected_seq = journal.commands.len() as u64;
        if record.seq != expected_seq {
            return Err(invalid(format!("expected seq {expected_seq}, found {}", record.seq)));
        }
        if record.prev_sha256_hex != prev_sha256_hex {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }
        let body = RecordBody { seq: record.seq, command: record.command };
        let expected = chain_hash(&body, &prev_sha256_hex).map_err(|e| invalid(e.to_string()))?;
        if record.sha256_hex != expected {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        journal.commands.push(CommandRecord { seq: record.seq, command: record.command });
        prev_sha256_hex = record.sha256_hex;
    }

    let next_seq = journal.commands.len() as u64;
    Ok(LoadedJournal { journal, last_sha256_hex: prev_sha256_hex, next_seq })
}

#[cfg(test)]
mod tests;
