//! Storage layer for Emotion Explorer data.
//!
//! This module handles persistence of journal entries.
//!
//! The journal is a single JSON file holding an array of entries, stored by
//! default at `~/.local/share/emotion-explorer/journal.json` (the platform data
//! directory). `EMX_DATA_DIR` replaces the whole directory, which is how tests
//! keep their journals isolated.

pub mod backend;
pub mod journal;

pub use backend::Journal;
pub use journal::JournalStore;

use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "EMX_DATA_DIR";

/// File name of the journal inside the data directory.
pub const JOURNAL_FILENAME: &str = "journal.json";

/// Get the data directory for Emotion Explorer.
///
/// `EMX_DATA_DIR` wins when set and non-empty; otherwise the platform data
/// directory with an `emotion-explorer` subdirectory.
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("emotion-explorer"))
}

/// Default location of the journal file.
pub fn default_journal_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(JOURNAL_FILENAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_data_dir_env_override() {
        // SAFETY: serialized with the other env-mutating tests
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/emx-test-data");
        }
        let path = default_journal_path().unwrap();
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }

        assert_eq!(path, PathBuf::from("/tmp/emx-test-data/journal.json"));
    }

    #[test]
    #[serial]
    fn test_empty_data_dir_env_is_ignored() {
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "");
        }
        let dir = get_data_dir();
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }

        if let Ok(dir) = dir {
            assert!(dir.ends_with("emotion-explorer"));
        }
    }
}
