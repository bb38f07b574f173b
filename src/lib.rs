//! Emotion Explorer - browse a feelings wheel and keep a journal of feelings.
//!
//! This library provides the core functionality for the `emx` CLI tool:
//! the taxonomy loader, hierarchy queries, the browsing/logging navigation
//! state machine, and the journal store.

pub mod cli;
pub mod commands;
pub mod config;
pub mod data;
pub mod hierarchy;
pub mod models;
pub mod navigation;
pub mod storage;

/// Test utilities for isolated test environments.
#[cfg(test)]
pub(crate) mod test_utils {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    use crate::models::{Emotion, EmotionSet};
    use crate::storage::JournalStore;

    /// Build an emotion with the given fields.
    pub fn emotion(id: &str, name: &str, kind: &str, parent: &str) -> Emotion {
        Emotion {
            id: id.to_string(),
            name: name.to_string(),
            emotion_type: kind.to_string(),
            color: "#888888".to_string(),
            parent_id: parent.to_string(),
        }
    }

    /// Build an emotion set keyed by id.
    pub fn emotion_set(emotions: Vec<Emotion>) -> EmotionSet {
        emotions
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect::<HashMap<_, _>>()
    }

    /// The joy/sadness/contentment scenario set, plus one tertiary under contentment.
    pub fn small_wheel() -> EmotionSet {
        emotion_set(vec![
            emotion("joy", "Joy", "primary", ""),
            emotion("sadness", "Sadness", "primary", ""),
            emotion("contentment", "Contentment", "secondary", "joy"),
            emotion("serenity", "Serenity", "tertiary", "contentment"),
        ])
    }

    /// Test environment with an isolated journal directory.
    pub struct TestEnv {
        pub data_dir: TempDir,
    }

    impl TestEnv {
        pub fn new() -> Self {
            Self {
                data_dir: TempDir::new().unwrap(),
            }
        }

        /// Get the path to the isolated data directory.
        pub fn data_path(&self) -> &Path {
            self.data_dir.path()
        }

        pub fn journal_path(&self) -> PathBuf {
            self.data_path().join("journal.json")
        }

        /// Open a journal store on this environment's journal file.
        pub fn journal(&self) -> JournalStore {
            JournalStore::new(self.journal_path())
        }
    }

    impl Default for TestEnv {
        fn default() -> Self {
            Self::new()
        }
    }
}

/// Library-level error type for Emotion Explorer operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load emotion data: {0}")]
    DataLoad(String),

    #[error("Journal error: {0}")]
    Journal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Emotion not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for Emotion Explorer operations.
pub type Result<T> = std::result::Result<T, Error>;
