//! Common test utilities for emx integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's real journal or config.kdl.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
pub use tempfile::TempDir;

/// A test environment with isolated data and config directories.
///
/// The `emx()` method returns a `Command` that sets `EMX_DATA_DIR` and
/// `EMX_CONFIG_DIR` per-invocation, making tests parallel-safe.
pub struct TestEnv {
    pub data_dir: TempDir,
    pub config_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            data_dir: TempDir::new().unwrap(),
            config_dir: TempDir::new().unwrap(),
        }
    }

    /// Get a Command for the emx binary with isolated directories.
    pub fn emx(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_emx"));
        cmd.env("EMX_DATA_DIR", self.data_dir.path());
        cmd.env("EMX_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("EMX_JOURNAL");
        cmd.env_remove("EMX_EMOTIONS");
        cmd.env_remove("EMX_LOG");
        cmd
    }

    pub fn data_path(&self) -> &Path {
        self.data_dir.path()
    }

    /// Default journal location inside the isolated data directory.
    pub fn journal_path(&self) -> PathBuf {
        self.data_dir.path().join("journal.json")
    }

    /// Write config.kdl into the isolated config directory.
    pub fn write_config(&self, kdl: &str) {
        std::fs::write(self.config_dir.path().join("config.kdl"), kdl).unwrap();
    }

    /// Parse the journal file as JSON.
    pub fn journal_json(&self) -> serde_json::Value {
        let content = std::fs::read_to_string(self.journal_path()).unwrap();
        serde_json::from_str(&content).unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a command's stdout as JSON.
pub fn parse_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}
