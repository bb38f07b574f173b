//! Data models for Emotion Explorer.
//!
//! This module defines the core data structures:
//! - `Emotion` - One node of the feelings wheel (primary, secondary, tertiary)
//! - `EmotionData` - The whole taxonomy document (metadata, level types, emotions)
//! - `LogEntry` - One journaled selection of an emotion

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Type tag carried by root-level emotions.
pub const PRIMARY_TYPE: &str = "primary";

/// All emotions of a taxonomy keyed by id.
///
/// Loaded once at startup and never written afterwards.
pub type EmotionSet = HashMap<String, Emotion>;

/// A single emotion and its place in the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emotion {
    /// Unique key (e.g., "happy")
    pub id: String,

    /// Display name (e.g., "Happy")
    pub name: String,

    /// Level tag, one of the taxonomy's emotion types (e.g., "primary")
    #[serde(rename = "type")]
    pub emotion_type: String,

    /// Hex display color, interpreted by the presentation layer only
    pub color: String,

    /// Parent emotion id; empty for root-level emotions
    #[serde(
        rename = "parentId",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub parent_id: String,
}

impl Emotion {
    /// Whether this emotion is tagged as root-level.
    pub fn is_primary(&self) -> bool {
        self.emotion_type == PRIMARY_TYPE
    }

    /// Whether this emotion names a parent at all.
    pub fn has_parent(&self) -> bool {
        !self.parent_id.is_empty()
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Free-form information about where a taxonomy came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub version: String,
    pub source: String,
    #[serde(default)]
    pub description: String,
}

/// One level of the hierarchy (primary, secondary, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionType {
    pub id: String,
    pub name: String,
    pub level: u32,
}

/// The full taxonomy document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmotionData {
    pub metadata: Metadata,

    /// Level types keyed by type id
    #[serde(rename = "emotionTypes")]
    pub emotion_types: HashMap<String, EmotionType>,

    /// Emotions keyed by emotion id
    pub emotions: EmotionSet,
}

/// A journaled emotion selection.
///
/// Entries are appended to the journal and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the emotion was selected
    pub timestamp: DateTime<Utc>,

    /// Id of the selected emotion
    pub emotion_id: String,

    /// Name of the emotion at logging time
    pub emotion_name: String,

    /// Optional free-text note (reserved)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LogEntry {
    /// Create an entry for the given emotion at the given instant.
    pub fn new(emotion: &Emotion, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            emotion_id: emotion.id.clone(),
            emotion_name: emotion.name.clone(),
            notes: None,
        }
    }
}
