use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::snapshot::{Snapshot, SnapshotError, SnapshotStore};

/// Snapshot stored as pretty JSON on disk. Writes go to a sibling `.tmp`
/// file first and are renamed into place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveFile {
    path: PathBuf,
}

impl SaveFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_atomic(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        let json = snapshot.encode()?;

        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    pub fn read(&self) -> Result<Snapshot, SnapshotError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(SnapshotError::Missing);
            }
            Err(err) => return Err(err.into()),
        };
        Snapshot::decode(&content)
    }
}

impl SnapshotStore for SaveFile {
    fn load(&mut self) -> Result<Snapshot, SnapshotError> {
        self.read()
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        self.write_atomic(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::game::Game;
    use tempfile::tempdir;

    #[test]
    fn atomic_write_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saves").join("savefile.json");
        let mut file = SaveFile::new(&path);

        let snapshot = Game::new(99, &GameConfig::default()).snapshot();
        file.save(&snapshot).unwrap();
        assert!(path.exists());

        let loaded = file.load().unwrap();
        assert_eq!(snapshot, loaded);

        // Verify tmp file is gone
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn missing_file_is_reported_as_missing() {
        let dir = tempdir().unwrap();
        let file = SaveFile::new(dir.path().join("absent.json"));
        assert!(matches!(file.read(), Err(SnapshotError::Missing)));
    }

    #[test]
    fn garbage_is_a_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("savefile.json");
        fs::write(&path, "not a snapshot").unwrap();
        assert!(matches!(SaveFile::new(&path).read(), Err(SnapshotError::Json(_))));
    }
}
