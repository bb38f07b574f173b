//! Browsing/logging navigation over the emotion hierarchy.
//!
//! The [`NavigationController`] owns one frame stack per mode and turns UI
//! events into the next view to render:
//!
//! - **Browsing** (initial): selecting an emotion with children drills into
//!   them; selecting a leaf only reports it.
//! - **Logging**: entered on demand with a fresh stack; selecting a leaf
//!   appends a journal entry and returns to browsing, exactly where browsing
//!   was left.
//!
//! The controller knows nothing about presentation. Callers feed it
//! [`Event`]s and render the [`View`] inside the returned [`Transition`].

mod controller;
mod frame;

pub use controller::NavigationController;
pub use frame::{NavigationFrame, NavigationStack};

use crate::models::{Emotion, LogEntry};
use serde::Serialize;

/// Application name shown in window titles.
pub const APP_NAME: &str = "Emotion Explorer";

/// Which stack is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Browsing,
    Logging,
}

impl Mode {
    /// Window title while this mode is active.
    pub fn window_title(&self) -> &'static str {
        match self {
            Mode::Browsing => APP_NAME,
            Mode::Logging => "Emotion Explorer - Logging...",
        }
    }

    /// Title of this mode's root frame.
    pub fn root_title(&self) -> &'static str {
        match self {
            Mode::Browsing => "Primary Emotions",
            Mode::Logging => "Select Feeling to Log",
        }
    }

    /// Title of a frame listing the children of `parent_name`.
    pub fn child_title(&self, parent_name: &str) -> String {
        match self {
            Mode::Browsing => format!("Exploring: {}", parent_name),
            Mode::Logging => format!("Log > {} > ...", parent_name),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Browsing => "browsing",
            Mode::Logging => "logging",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inbound events from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An item of the current frame was chosen
    ItemSelected(Emotion),
    /// The user asked to go back
    BackRequested,
    /// Start logging a feeling (e.g., from a tray menu)
    EnterLogging,
    /// Leave logging without saving (e.g., the window was closed)
    ExitToBrowsing,
}

/// Something worth telling the user about a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Nothing beyond the new view
    None,
    /// A leaf was selected while browsing
    LeafReached { emotion: Emotion },
    /// A leaf was selected while logging and the entry was saved
    Logged { entry: LogEntry },
    /// A leaf was selected while logging but the journal refused the entry
    SaveFailed { emotion: Emotion, error: String },
    /// Logging was left without saving
    LoggingCancelled,
}

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct View {
    pub mode: Mode,
    pub window_title: &'static str,
    pub frame: NavigationFrame,
    /// Whether a back action would pop a frame
    pub back_enabled: bool,
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub view: View,
    pub notice: Notice,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_titles() {
        assert_eq!(Mode::Browsing.window_title(), "Emotion Explorer");
        assert_eq!(Mode::Logging.window_title(), "Emotion Explorer - Logging...");
        assert_eq!(Mode::default(), Mode::Browsing);
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(Mode::Browsing.to_string(), "browsing");
        assert_eq!(Mode::Logging.to_string(), "logging");
    }

    #[test]
    fn test_notice_serializes_with_kind_tag() {
        let value = serde_json::to_value(Notice::LoggingCancelled).unwrap();
        assert_eq!(value, serde_json::json!({"kind": "logging_cancelled"}));
    }
}
