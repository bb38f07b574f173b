//! Configuration for Emotion Explorer.
//!
//! ## config.kdl - User preferences
//!
//! Located at `~/.config/emotion-explorer/config.kdl` (the platform config
//! directory), or inside `EMX_CONFIG_DIR` when that is set.
//!
//! Contains:
//! - `journal-path` - Where journal entries are saved
//! - `emotions-path` - Alternative taxonomy document
//! - `output-format` - "json" or "human"
//! - `backup-corrupt` - Keep a copy of an unreadable journal before replacing it
//!
//! Use the [`resolver`] module for precedence resolution against CLI flags
//! and environment variables.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigOverrides, EMOTIONS_ENV, JOURNAL_ENV, Resolved, ResolvedConfig, ValueSource,
    resolve_config, resolve_config_with_env,
};
pub use schema::{ExplorerConfig, OutputFormat};

use crate::{Error, Result};
use std::path::PathBuf;

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "EMX_CONFIG_DIR";

/// Directory holding config.kdl.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let base = dirs::config_dir()
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
    Ok(base.join("emotion-explorer"))
}

/// Path of config.kdl.
pub fn config_kdl_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.kdl"))
}

/// Read the user's config.kdl, or an empty config if there is none.
pub fn load_user_config() -> Result<ExplorerConfig> {
    let path = config_kdl_path()?;
    let config = ExplorerConfig::load(&path)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
