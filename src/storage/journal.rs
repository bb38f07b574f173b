//! File-backed journal store.
//!
//! Every append is a full read-modify-write of the journal file. The whole
//! cycle runs under one process-wide mutex per journal path, shared by every
//! store opened on that path, so concurrent appends cannot drop each other's
//! entries.
//!
//! ## Recovery
//!
//! - Missing or empty file: zero entries.
//! - Unparseable content: zero entries. The next append overwrites it,
//!   optionally copying the old bytes to `journal.json.corrupt-<timestamp>`
//!   first.
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the journal, so a failed write leaves the previous content in place.

use super::backend::Journal;
use crate::models::LogEntry;
use crate::{Error, Result};
use chrono::Utc;
use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tempfile::NamedTempFile;

/// Journal persisted as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JournalStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    backup_corrupt: bool,
    lock: Arc<Mutex<()>>,
}

/// One lock per absolute journal path, for the lifetime of the process.
static PATH_LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = PATH_LOCKS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    Arc::clone(locks.entry(key).or_default())
}

/// What was found on disk before decoding.
enum Contents {
    Entries(Vec<LogEntry>),
    Corrupt(Vec<u8>),
}

impl JournalStore {
    /// Create a store for the journal at `path`, backing up corrupted content.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_backup(path, true)
    }

    /// Create a store, choosing whether corrupted content is backed up before
    /// it is overwritten.
    pub fn with_backup(path: impl Into<PathBuf>, backup_corrupt: bool) -> Self {
        let path = path.into();
        tracing::debug!(path = %path.display(), "journal file path set");
        let lock = lock_for(&path);
        Self {
            inner: Arc::new(Inner {
                path,
                backup_corrupt,
                lock,
            }),
        }
    }

    /// Path of the journal file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Append `entry` after all existing entries.
    ///
    /// Blocks while another append or load on the same path is in flight.
    pub fn append(&self, entry: LogEntry) -> Result<()> {
        let _guard = self.lock();
        tracing::info!(
            emotion = %entry.emotion_name,
            timestamp = %entry.timestamp.to_rfc3339(),
            "saving journal entry"
        );

        let mut entries = match self.read_contents()? {
            Contents::Entries(entries) => entries,
            Contents::Corrupt(raw) => {
                if self.inner.backup_corrupt {
                    self.backup(&raw);
                }
                Vec::new()
            }
        };
        entries.push(entry);
        self.write_entries(&entries)?;

        tracing::info!(total = entries.len(), "journal entry saved");
        Ok(())
    }

    /// Read every entry in append order.
    ///
    /// Missing, empty and unparseable files all read as no entries.
    pub fn load_all(&self) -> Result<Vec<LogEntry>> {
        let _guard = self.lock();
        match self.read_contents()? {
            Contents::Entries(entries) => {
                tracing::debug!(count = entries.len(), "loaded journal entries");
                Ok(entries)
            }
            Contents::Corrupt(_) => Ok(Vec::new()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // A panic mid-cycle cannot leave a half-written file behind, so a
        // poisoned lock is still safe to reuse.
        self.inner
            .lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read_contents(&self) -> Result<Contents> {
        let path = self.path();
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "journal file not found, starting fresh");
                return Ok(Contents::Entries(Vec::new()));
            }
            Err(e) => return Err(journal_error("reading", path, e)),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Contents::Entries(Vec::new()));
        }

        match serde_json::from_slice::<Vec<LogEntry>>(&raw) {
            Ok(entries) => Ok(Contents::Entries(entries)),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "journal file is corrupted, treating it as empty"
                );
                Ok(Contents::Corrupt(raw))
            }
        }
    }

    fn write_entries(&self, entries: &[LogEntry]) -> Result<()> {
        let path = self.path();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| journal_error("creating directory for", path, e))?;

        let mut json = serde_json::to_vec_pretty(entries)?;
        json.push(b'\n');

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| journal_error("staging", path, e))?;
        tmp.write_all(&json)
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| journal_error("writing", path, e))?;
        tmp.persist(path)
            .map_err(|e| journal_error("replacing", path, e.error))?;
        Ok(())
    }

    fn backup(&self, raw: &[u8]) {
        let path = self.path();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| super::JOURNAL_FILENAME.to_string());
        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6fZ");
        let backup_path = path.with_file_name(format!("{}.corrupt-{}", name, stamp));

        match fs::write(&backup_path, raw) {
            Ok(()) => tracing::warn!(
                backup = %backup_path.display(),
                "copied corrupted journal before overwriting it"
            ),
            Err(e) => tracing::warn!(
                backup = %backup_path.display(),
                error = %e,
                "could not back up corrupted journal"
            ),
        }
    }
}

impl Journal for JournalStore {
    fn append(&self, entry: LogEntry) -> Result<()> {
        JournalStore::append(self, entry)
    }

    fn load_all(&self) -> Result<Vec<LogEntry>> {
        JournalStore::load_all(self)
    }

    fn location(&self) -> String {
        self.path().display().to_string()
    }
}

fn journal_error(step: &str, path: &Path, err: std::io::Error) -> Error {
    tracing::error!(path = %path.display(), error = %err, "journal {} failed", step);
    Error::Journal(format!("{} journal file '{}': {}", step, path.display(), err))
}
