//! Loading and checking the emotion taxonomy.
//!
//! The Feelings Wheel taxonomy is compiled into the binary; an alternative
//! document of the same shape can be read from disk instead.

use crate::models::EmotionData;
use crate::{Error, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// The taxonomy shipped with the binary.
const EMBEDDED_EMOTIONS: &str = include_str!("../data/emotions.json");

/// Parse the embedded Feelings Wheel taxonomy.
pub fn load_embedded() -> Result<EmotionData> {
    parse(EMBEDDED_EMOTIONS, "embedded emotions.json")
}

/// Read and parse a taxonomy document from `path`.
pub fn load_from_path(path: &Path) -> Result<EmotionData> {
    let raw = fs::read_to_string(path).map_err(|e| {
        Error::DataLoad(format!("failed to read '{}': {}", path.display(), e))
    })?;
    parse(&raw, &path.display().to_string())
}

/// Load from `path` when given, otherwise the embedded taxonomy.
pub fn load(path: Option<&Path>) -> Result<EmotionData> {
    let data = match path {
        Some(p) => load_from_path(p)?,
        None => load_embedded()?,
    };
    tracing::debug!(
        version = %data.metadata.version,
        emotions = data.emotions.len(),
        "loaded emotion data"
    );
    Ok(data)
}

fn parse(raw: &str, origin: &str) -> Result<EmotionData> {
    serde_json::from_str(raw)
        .map_err(|e| Error::DataLoad(format!("failed to parse {}: {}", origin, e)))
}

/// A consistency problem found in a taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    /// An emotion's parent id names no emotion in the set
    DanglingParent { id: String, parent_id: String },
    /// An emotion's type is not one of the declared emotion types
    UnknownType { id: String, emotion_type: String },
    /// The map key an emotion is filed under differs from its own id
    KeyMismatch { key: String, id: String },
}

impl std::fmt::Display for DataIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataIssue::DanglingParent { id, parent_id } => {
                write!(f, "{}: parent '{}' does not exist", id, parent_id)
            }
            DataIssue::UnknownType { id, emotion_type } => {
                write!(f, "{}: type '{}' is not declared", id, emotion_type)
            }
            DataIssue::KeyMismatch { key, id } => {
                write!(f, "{}: filed under key '{}'", id, key)
            }
        }
    }
}

/// Check a taxonomy for consistency problems.
///
/// Issues are diagnostic only; queries over a set with issues still work.
/// The result is sorted so reports are stable.
pub fn validate(data: &EmotionData) -> Vec<DataIssue> {
    let mut issues = Vec::new();

    for (key, emotion) in &data.emotions {
        if key != &emotion.id {
            issues.push(DataIssue::KeyMismatch {
                key: key.clone(),
                id: emotion.id.clone(),
            });
        }
        if emotion.has_parent() && !data.emotions.contains_key(&emotion.parent_id) {
            issues.push(DataIssue::DanglingParent {
                id: emotion.id.clone(),
                parent_id: emotion.parent_id.clone(),
            });
        }
        if !data.emotion_types.contains_key(&emotion.emotion_type) {
            issues.push(DataIssue::UnknownType {
                id: emotion.id.clone(),
                emotion_type: emotion.emotion_type.clone(),
            });
        }
    }

    issues.sort_by_key(|issue| issue.to_string());
    for issue in &issues {
        tracing::warn!(%issue, "taxonomy issue");
    }
    issues
}
