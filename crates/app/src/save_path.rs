use std::path::PathBuf;

use directories::ProjectDirs;

use crate::APP_NAME;

pub const SAVE_FILE_NAME: &str = "savefile.json";

/// `savefile.json` inside the per-user data directory, or `None` when the
/// platform reports no home directory.
pub fn default_save_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_dir().join(SAVE_FILE_NAME))
}

/// The data-directory save when available, else `savefile.json` in the
/// working directory.
pub fn resolve_save_path() -> PathBuf {
    default_save_path().unwrap_or_else(|| PathBuf::from(SAVE_FILE_NAME))
}
