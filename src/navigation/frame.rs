//! Navigation frames and the per-mode frame stack.

use super::Mode;
use crate::models::Emotion;
use serde::Serialize;

/// Data for one screen: a title, the emotion that scoped it, and the
/// emotions to offer, ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationFrame {
    pub title: String,
    /// `None` for a mode's root frame
    pub parent: Option<Emotion>,
    pub items: Vec<Emotion>,
}

impl NavigationFrame {
    /// The root frame of `mode`, listing the primary emotions.
    pub fn root(mode: Mode, primaries: Vec<Emotion>) -> Self {
        Self {
            title: mode.root_title().to_string(),
            parent: None,
            items: primaries,
        }
    }

    /// A frame listing the direct children of `parent`.
    pub fn child(mode: Mode, parent: Emotion, children: Vec<Emotion>) -> Self {
        Self {
            title: mode.child_title(&parent.name),
            parent: Some(parent),
            items: children,
        }
    }

    /// Whether this frame is a root frame.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Find an offered emotion by id.
    pub fn item(&self, id: &str) -> Option<&Emotion> {
        self.items.iter().find(|e| e.id == id)
    }
}

/// A never-empty stack of frames. The bottom frame cannot be popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    frames: Vec<NavigationFrame>,
}

impl NavigationStack {
    /// A stack holding only `root`.
    pub fn new(root: NavigationFrame) -> Self {
        Self { frames: vec![root] }
    }

    pub fn push(&mut self, frame: NavigationFrame) {
        self.frames.push(frame);
    }

    /// Remove the top frame unless it is the root.
    ///
    /// Returns the removed frame, or `None` when only the root is left.
    pub fn pop(&mut self) -> Option<NavigationFrame> {
        if self.frames.len() > 1 {
            self.frames.pop()
        } else {
            None
        }
    }

    /// The frame currently on top.
    pub fn top(&self) -> &NavigationFrame {
        // frames always holds at least the root
        &self.frames[self.frames.len() - 1]
    }

    /// The bottom frame.
    pub fn root(&self) -> &NavigationFrame {
        &self.frames[0]
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether only the root frame is left.
    pub fn at_root(&self) -> bool {
        self.frames.len() == 1
    }

    /// Frames from bottom to top.
    pub fn frames(&self) -> &[NavigationFrame] {
        &self.frames
    }
}
