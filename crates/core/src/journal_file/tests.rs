use std::fs::{self, OpenOptions};
use std::io::Write;

use tempfile::tempdir;

use super::*;
use crate::types::Direction;

#[test]
fn header_and_records_survive_a_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("roundtrip.jsonl");

    let mut writer = JournalWriter::create(&path, 42, "test-build").unwrap();
    writer.append(Command::NewGame(123)).unwrap();
    writer.append(Command::Move(Direction::Up)).unwrap();
    writer.append(Command::Quit).unwrap();

    let loaded = load_journal_from_file(&path).unwrap();
    assert_eq!(loaded.journal.format_version, JOURNAL_FORMAT_VERSION);
    assert_eq!(loaded.journal.build_id, "test-build");
    assert_eq!(loaded.journal.fallback_seed, 42);
    assert_eq!(
        loaded.journal.commands().collect::<Vec<_>>(),
        [Command::NewGame(123), Command::Move(Direction::Up), Command::Quit]
    );
    assert_eq!(loaded.next_seq, 3);
    assert_ne!(loaded.last_sha256_hex, INITIAL_HASH);
}

#[test]
fn tampered_command_breaks_the_chain() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tampered.jsonl");

    let mut writer = JournalWriter::create(&path, 1, "dev").unwrap();
    writer.append(Command::NewGame(9)).unwrap();
    writer.append(Command::Move(Direction::Left)).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = content.lines().map(String::from).collect();
    assert_eq!(lines.len(), 3, "expected header + 2 records");
    lines[2] = lines[2].replace("Left", "Right");
    fs::write(&path, lines.join("\n") + "\n").unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalLoadError::HashChainBroken { line: 3 })),
        "expected hash chain broken at line 3, got: {result:?}"
    );
}

#[test]
fn dropped_record_is_detected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("deleted.jsonl");

    let mut writer = JournalWriter::create(&path, 1, "dev").unwrap();
    for command in [Command::NewGame(1), Command::Load, Command::Quit] {
        writer.append(command).unwrap();
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    fs::write(&path, format!("{}\n{}\n{}\n", lines[0], lines[1], lines[3])).unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalLoadError::InvalidRecord { line: 3, .. })),
        "a gap in seq is reported before the hash check, got: {result:?}"
    );
}

#[test]
fn truncated_last_line_is_incomplete() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("truncated.jsonl");

    let mut writer = JournalWriter::create(&path, 1, "dev").unwrap();
    writer.append(Command::NewGame(1)).unwrap();

    let mut file = OpenOptions::new().append(true).open(&path).unwrap();
    write!(file, "{{\"seq\":1,\"comm").unwrap();

    let result = load_journal_from_file(&path);
    assert!(
        matches!(result, Err(JournalLoadError::IncompleteLine { line: 3 })),
        "expected incomplete line at line 3, got: {result:?}"
    );
}

#[test]
fn empty_and_garbage_files_are_rejected() {
    let dir = tempdir().unwrap();
    let empty = dir.path().join("empty.jsonl");
    fs::write(&empty, "").unwrap();
    assert!(matches!(load_journal_from_file(&empty), Err(JournalLoadError::EmptyFile)));

    let garbage = dir.path().join("garbage.jsonl");
    fs::write(&garbage, "not valid json\n").unwrap();
    assert!(matches!(
        load_journal_from_file(&garbage),
        Err(JournalLoadError::InvalidHeader { line: 1, .. })
    ));

    let missing = dir.path().join("missing.jsonl");
    assert!(matches!(load_journal_from_file(&missing), Err(JournalLoadError::Io(_))));
}

#[test]
fn resumed_writer_extends_the_same_chain() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("resume.jsonl");

    let mut writer = JournalWriter::create(&path, 1, "dev").unwrap();
    writer.append(Command::NewGame(5)).unwrap();
    drop(writer);

    let loaded = load_journal_from_file(&path).unwrap();
    let mut writer = JournalWriter::resume(&path, &loaded).unwrap();
    writer.append(Command::Move(Direction::Down)).unwrap();
    drop(writer);

    let reloaded = load_journal_from_file(&path).unwrap();
    assert_eq!(reloaded.journal.commands.len(), 2);
    assert_eq!(reloaded.journal.commands[1].seq, 1);
    assert_eq!(reloaded.next_seq, 2);
}

#[test]
fn header_only_file_loads_an_empty_journal() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("header_only.jsonl");
    let _writer = JournalWriter::create(&path, 555, "dev").unwrap();

    let loaded = load_journal_from_file(&path).unwrap();
    assert_eq!(loaded.journal.fallback_seed, 555);
    assert!(loaded.journal.commands.is_empty());
    assert_eq!(loaded.last_sha256_hex, INITIAL_HASH);
}

#[cfg(target_os = "linux")]
#[test]
fn failed_append_keeps_the_chain_state() {
    let loaded = LoadedJournal {
        journal: CommandJournal::new(0),
        last_sha256_hex: "ab".repeat(32),
        next_seq: 3,
    };
    let mut writer = JournalWriter::resume(Path::new("/dev/full"), &loaded).unwrap();

    for _ in 0..2 {
        assert!(writer.append(Command::Move(Direction::Down)).is_err());
        assert_eq!(writer.last_sha256_hex, "ab".repeat(32));
        assert_eq!(writer.next_seq, 3);
    }
}
