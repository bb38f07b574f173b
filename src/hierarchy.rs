//! Read-only queries over an emotion set.
//!
//! Both queries return emotions sorted by name (byte-wise, case-sensitive)
//! so the same taxonomy always lays out the same way. Unknown ids, empty
//! sets and leaves all produce an empty `Vec`; nothing here fails. The
//! empty id is matched like any other, so its children are the parentless
//! emotions.

use crate::models::{Emotion, EmotionSet};

/// All root-level emotions, sorted by name.
pub fn primary_emotions(set: &EmotionSet) -> Vec<Emotion> {
    sorted_by_name(set.values().filter(|e| e.is_primary()))
}

/// Direct children of `parent_id`, sorted by name.
///
/// Only emotions whose parent id equals `parent_id` exactly are returned;
/// deeper descendants are not.
pub fn children_of(parent_id: &str, set: &EmotionSet) -> Vec<Emotion> {
    sorted_by_name(set.values().filter(|e| e.parent_id == parent_id))
}

/// Whether `id` has no direct children.
pub fn is_leaf(id: &str, set: &EmotionSet) -> bool {
    !set.values().any(|e| e.parent_id == id)
}

fn sorted_by_name<'a>(emotions: impl Iterator<Item = &'a Emotion>) -> Vec<Emotion> {
    let mut out: Vec<Emotion> = emotions.cloned().collect();
    // Stable sort; ties fall back to id so output doesn't depend on map order
    out.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
    out
}
