//! Journal trait.
//!
//! The navigation controller only needs "append an entry"; the file-backed
//! [`JournalStore`](super::JournalStore) is the production implementation.

use crate::Result;
use crate::models::LogEntry;

/// Trait for journals that persist log entries.
///
/// Implementations must serialize concurrent calls so that no appended
/// entry is ever lost.
pub trait Journal: Send + Sync {
    /// Append one entry after all existing ones.
    fn append(&self, entry: LogEntry) -> Result<()>;

    /// Read every entry in append order.
    fn load_all(&self) -> Result<Vec<LogEntry>>;

    /// Get the journal location description (for display purposes).
    fn location(&self) -> String;
}
