//! Precedence resolution for configuration.
//!
//! ## Precedence (highest to lowest)
//!
//! 1. CLI flags (passed at runtime)
//! 2. Environment variables (`EMX_JOURNAL`, `EMX_EMOTIONS`)
//! 3. config.kdl
//! 4. Built-in defaults

use super::schema::{ExplorerConfig, OutputFormat};
use crate::Result;
use crate::storage::default_journal_path;
use std::path::{Path, PathBuf};

/// Environment variable naming the journal file.
pub const JOURNAL_ENV: &str = "EMX_JOURNAL";

/// Environment variable naming an alternative taxonomy document.
pub const EMOTIONS_ENV: &str = "EMX_EMOTIONS";

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from CLI flag
    CliFlag,
    /// Value from environment variable
    EnvVar(String),
    /// Value from config.kdl
    ConfigFile,
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::CliFlag => write!(f, "cli"),
            ValueSource::EnvVar(name) => write!(f, "env:{}", name),
            ValueSource::ConfigFile => write!(f, "config"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// CLI overrides for configuration resolution.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub journal_path: Option<PathBuf>,
    pub emotions_path: Option<PathBuf>,
    pub output_format: Option<OutputFormat>,
}

impl ConfigOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.journal_path = Some(path.into());
        self
    }

    pub fn with_emotions_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.emotions_path = Some(path.into());
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }
}

/// Fully resolved configuration with source tracking.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Journal file, fixed for the rest of the process
    pub journal_path: Resolved<PathBuf>,
    /// Alternative taxonomy; `None` means the built-in wheel
    pub emotions_path: Option<Resolved<PathBuf>>,
    pub output_format: Resolved<OutputFormat>,
    pub backup_corrupt: Resolved<bool>,
}

impl ResolvedConfig {
    pub fn journal_path(&self) -> &Path {
        &self.journal_path.value
    }

    pub fn emotions_path(&self) -> Option<&Path> {
        self.emotions_path.as_ref().map(|r| r.value.as_path())
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format.value
    }

    pub fn backup_corrupt(&self) -> bool {
        self.backup_corrupt.value
    }
}

/// Resolve configuration from the process environment.
pub fn resolve_config(
    file: &ExplorerConfig,
    overrides: &ConfigOverrides,
) -> Result<ResolvedConfig> {
    resolve_config_with_env(file, overrides, |name| std::env::var(name).ok())
}

/// Resolve configuration with an explicit environment lookup.
pub fn resolve_config_with_env(
    file: &ExplorerConfig,
    overrides: &ConfigOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let env_path = |name: &str| env(name).filter(|v| !v.is_empty()).map(PathBuf::from);

    let journal_path = if let Some(ref path) = overrides.journal_path {
        Resolved::new(path.clone(), ValueSource::CliFlag)
    } else if let Some(path) = env_path(JOURNAL_ENV) {
        Resolved::new(path, ValueSource::EnvVar(JOURNAL_ENV.to_string()))
    } else if let Some(ref path) = file.journal_path {
        Resolved::new(expand_home(Path::new(path)), ValueSource::ConfigFile)
    } else {
        Resolved::new(default_journal_path()?, ValueSource::Default)
    };

    let emotions_path = if let Some(ref path) = overrides.emotions_path {
        Some(Resolved::new(path.clone(), ValueSource::CliFlag))
    } else if let Some(path) = env_path(EMOTIONS_ENV) {
        Some(Resolved::new(path, ValueSource::EnvVar(EMOTIONS_ENV.to_string())))
    } else {
        file.emotions_path
            .as_ref()
            .map(|path| Resolved::new(expand_home(Path::new(path)), ValueSource::ConfigFile))
    };

    let output_format = if let Some(format) = overrides.output_format {
        Resolved::new(format, ValueSource::CliFlag)
    } else if let Some(format) = file.output_format {
        Resolved::new(format, ValueSource::ConfigFile)
    } else {
        Resolved::new(OutputFormat::default(), ValueSource::Default)
    };

    let backup_corrupt = match file.backup_corrupt {
        Some(backup) => Resolved::new(backup, ValueSource::ConfigFile),
        None => Resolved::new(true, ValueSource::Default),
    };

    Ok(ResolvedConfig {
        journal_path,
        emotions_path,
        output_format,
        backup_corrupt,
    })
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}
