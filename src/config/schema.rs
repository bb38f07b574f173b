//! KDL schema for config.kdl.
//!
//! This module provides:
//! - The Rust struct representing the KDL schema
//! - Parsing from KDL format
//! - Validation

use crate::{Error, Result};
use kdl::KdlDocument;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User preferences stored in config.kdl.
///
/// # KDL Schema
///
/// ```kdl
/// journal-path "~/notes/feelings.json"
/// emotions-path "/usr/share/emotion-explorer/wheel.json"
/// output-format "human"  // or "json"
/// backup-corrupt #true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Where the journal lives
    pub journal_path: Option<String>,

    /// Taxonomy document to load instead of the built-in wheel
    pub emotions_path: Option<String>,

    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Copy a corrupted journal aside before overwriting it
    pub backup_corrupt: Option<bool>,
}

impl ExplorerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the config values.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.journal_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err("journal-path must not be empty".to_string());
        }
        if self.emotions_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err("emotions-path must not be empty".to_string());
        }
        Ok(())
    }

    /// Parse config from a KDL document. Unknown nodes are ignored.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::new();

        config.journal_path = first_string(doc, "journal-path");
        config.emotions_path = first_string(doc, "emotions-path");
        config.output_format =
            first_string(doc, "output-format").and_then(|s| OutputFormat::parse(&s));

        if let Some(node) = doc.get("backup-corrupt") {
            if let Some(entry) = node.entries().first() {
                config.backup_corrupt = entry.value().as_bool();
            }
        }

        config
    }

    /// Read config.kdl from `path`. A missing file is an empty config.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };

        let doc: KdlDocument = text
            .parse()
            .map_err(|e| Error::Config(format!("invalid {}: {}", path.display(), e)))?;
        let config = Self::from_kdl(&doc);
        config
            .validate()
            .map_err(|msg| Error::Config(format!("{}: {}", path.display(), msg)))?;
        Ok(config)
    }
}

fn first_string(doc: &KdlDocument, name: &str) -> Option<String> {
    let node = doc.get(name)?;
    let entry = node.entries().first()?;
    entry.value().as_string().map(str::to_string)
}
