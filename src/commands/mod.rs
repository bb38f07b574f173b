//! Command implementations for the Emotion Explorer CLI.
//!
//! Each command returns a result type implementing [`Output`], which `main`
//! prints as JSON or as human-readable text.

mod explore;

pub use explore::explore;

use crate::config::{self, ConfigOverrides, ExplorerConfig, ResolvedConfig};
use crate::data::{self, DataIssue};
use crate::hierarchy::{children_of, is_leaf, primary_emotions};
use crate::models::{Emotion, EmotionData, EmotionSet, LogEntry};
use crate::navigation::{Event, Mode, NavigationController, Notice};
use crate::storage::{Journal, JournalStore};
use crate::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Everything a command needs, resolved once at startup.
pub struct Context {
    pub config: ResolvedConfig,
    pub data: EmotionData,
    pub journal: JournalStore,
}

impl Context {
    /// Resolve configuration, load the taxonomy, and open the journal.
    ///
    /// Fails with `Error::DataLoad` when the taxonomy cannot be loaded.
    pub fn open(overrides: &ConfigOverrides) -> Result<Self> {
        let file = config::load_user_config()?;
        Self::open_with(&file, overrides)
    }

    /// Like [`Context::open`] with an already-loaded config file.
    pub fn open_with(file: &ExplorerConfig, overrides: &ConfigOverrides) -> Result<Self> {
        let config = config::resolve_config(file, overrides)?;
        let data = data::load(config.emotions_path())?;
        let journal = JournalStore::with_backup(config.journal_path(), config.backup_corrupt());
        Ok(Self {
            config,
            data,
            journal,
        })
    }

    pub fn emotions(&self) -> &EmotionSet {
        &self.data.emotions
    }

    /// A fresh navigation session writing to this context's journal.
    pub fn controller(&self) -> NavigationController {
        NavigationController::new(self.data.emotions.clone(), Arc::new(self.journal.clone()))
    }

    fn find(&self, id: &str) -> Result<&Emotion> {
        self.emotions()
            .get(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

fn human_list(emotions: &[Emotion]) -> Vec<String> {
    emotions
        .iter()
        .map(|e| format!("  {} ({})", e.name, e.id))
        .collect()
}

// === Status ===

#[derive(Debug, Serialize)]
pub struct StatusResult {
    pub version: String,
    pub source: String,
    pub emotions: usize,
    pub primary: usize,
    pub journal_path: PathBuf,
    pub journal_entries: usize,
    pub commit: String,
    pub built_at: String,
}

impl Output for StatusResult {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        [
            "Emotion Explorer".to_string(),
            format!("  Taxonomy: {} v{}", self.source, self.version),
            format!("  Emotions: {} ({} primary)", self.emotions, self.primary),
            format!("  Journal:  {}", self.journal_path.display()),
            format!("  Entries:  {}", self.journal_entries),
            format!("  Build:    {} ({})", self.commit, self.built_at),
        ]
        .join("\n")
    }
}

/// Overview of the loaded taxonomy and the journal.
pub fn status(ctx: &Context) -> Result<StatusResult> {
    Ok(StatusResult {
        version: ctx.data.metadata.version.clone(),
        source: ctx.data.metadata.source.clone(),
        emotions: ctx.emotions().len(),
        primary: primary_emotions(ctx.emotions()).len(),
        journal_path: ctx.journal.path().to_path_buf(),
        journal_entries: ctx.journal.load_all()?.len(),
        commit: env!("EMX_GIT_COMMIT").to_string(),
        built_at: env!("EMX_BUILD_TIMESTAMP").to_string(),
    })
}

// === Listing ===

#[derive(Debug, Serialize)]
pub struct EmotionList {
    /// Id whose children are listed; `None` for the primary emotions
    pub parent: Option<String>,
    pub count: usize,
    pub emotions: Vec<Emotion>,
}

impl Output for EmotionList {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let header = match &self.parent {
            None => "Primary Emotions".to_string(),
            Some(id) if self.emotions.is_empty() => format!("{} has no children", id),
            Some(id) => format!("Children of {}", id),
        };
        let mut lines = vec![header];
        lines.extend(human_list(&self.emotions));
        lines.join("\n")
    }
}

/// The primary emotions.
pub fn primary(ctx: &Context) -> EmotionList {
    let emotions = primary_emotions(ctx.emotions());
    EmotionList {
        parent: None,
        count: emotions.len(),
        emotions,
    }
}

/// Direct children of `id`; empty for leaves and unknown ids.
pub fn children(ctx: &Context, id: &str) -> EmotionList {
    let emotions = children_of(id, ctx.emotions());
    EmotionList {
        parent: Some(id.to_string()),
        count: emotions.len(),
        emotions,
    }
}

#[derive(Debug, Serialize)]
pub struct EmotionDetail {
    pub emotion: Emotion,
    pub parent: Option<Emotion>,
    pub children: Vec<Emotion>,
    pub leaf: bool,
}

impl Output for EmotionDetail {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        let e = &self.emotion;
        let mut lines = vec![
            format!("{} ({})", e.name, e.id),
            format!("  Type:   {}", e.emotion_type),
            format!("  Color:  {}", e.color),
        ];
        if let Some(ref parent) = self.parent {
            lines.push(format!("  Parent: {} ({})", parent.name, parent.id));
        }
        if self.leaf {
            lines.push("  Leaf: can be logged".to_string());
        } else {
            lines.push(format!("  Children ({}):", self.children.len()));
            lines.extend(
                self.children
                    .iter()
                    .map(|c| format!("    {} ({})", c.name, c.id)),
            );
        }
        lines.join("\n")
    }
}

/// One emotion with its parent and children.
pub fn show(ctx: &Context, id: &str) -> Result<EmotionDetail> {
    let emotion = ctx.find(id)?.clone();
    let parent = ctx.emotions().get(&emotion.parent_id).cloned();
    let children = children_of(id, ctx.emotions());
    Ok(EmotionDetail {
        leaf: is_leaf(id, ctx.emotions()),
        emotion,
        parent,
        children,
    })
}

// === Logging ===

#[derive(Debug, Serialize)]
pub struct LogResult {
    pub logged: LogEntry,
    pub journal: String,
}

impl Output for LogResult {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Logged: {} at {}",
            self.logged.emotion_name,
            self.logged.timestamp.to_rfc3339()
        )
    }
}

/// Log a feeling by walking the logging flow down `path`.
///
/// `path` lists ids from a primary emotion to a leaf. A single id is
/// expanded to the chain of its ancestors first.
pub fn log(ctx: &Context, path: &[String]) -> Result<LogResult> {
    let path = match path {
        [single] => ancestry(ctx.emotions(), single)?,
        _ => path.to_vec(),
    };
    check_log_path(ctx.emotions(), &path)?;

    let mut nav = ctx.controller();
    nav.dispatch(Event::EnterLogging);

    for id in &path {
        let emotion = nav
            .current_frame()
            .item(id)
            .cloned()
            .ok_or_else(|| Error::InvalidInput(format!("'{}' is not offered here", id)))?;

        match nav.dispatch(Event::ItemSelected(emotion)).notice {
            Notice::Logged { entry } => {
                return Ok(LogResult {
                    logged: entry,
                    journal: ctx.journal.location(),
                });
            }
            Notice::SaveFailed { error, .. } => return Err(Error::Journal(error)),
            _ => {}
        }
    }

    // check_log_path guarantees the walk ends at a leaf
    debug_assert_eq!(nav.mode(), Mode::Logging);
    Err(Error::InvalidInput("path does not end at a leaf".to_string()))
}

/// Ids from the primary ancestor of `id` down to `id`.
fn ancestry(emotions: &EmotionSet, id: &str) -> Result<Vec<String>> {
    let mut chain = Vec::new();
    let mut current = emotions
        .get(id)
        .ok_or_else(|| Error::NotFound(id.to_string()))?;

    loop {
        if chain.contains(&current.id) {
            return Err(Error::InvalidInput(format!(
                "'{}' has a cyclic parent chain",
                id
            )));
        }
        chain.push(current.id.clone());
        if !current.has_parent() {
            break;
        }
        current = emotions
            .get(&current.parent_id)
            .ok_or_else(|| Error::NotFound(current.parent_id.clone()))?;
    }

    chain.reverse();
    Ok(chain)
}

/// Validate `path` against the hierarchy without touching the journal.
fn check_log_path(emotions: &EmotionSet, path: &[String]) -> Result<()> {
    let mut offered = primary_emotions(emotions);

    for (i, id) in path.iter().enumerate() {
        if !offered.iter().any(|e| &e.id == id) {
            return Err(match emotions.get(id) {
                None => Error::NotFound(id.clone()),
                Some(_) if i == 0 => {
                    Error::InvalidInput(format!("'{}' is not a primary emotion", id))
                }
                Some(_) => Error::InvalidInput(format!(
                    "'{}' is not a child of '{}'",
                    id,
                    path[i - 1]
                )),
            });
        }

        let children = children_of(id, emotions);
        let last = i + 1 == path.len();
        if children.is_empty() && !last {
            return Err(Error::InvalidInput(format!(
                "'{}' has no children but the path continues",
                id
            )));
        }
        if !children.is_empty() && last {
            return Err(Error::InvalidInput(format!(
                "'{}' is not a leaf; choose one of its children",
                id
            )));
        }
        offered = children;
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct JournalList {
    pub path: String,
    pub total: usize,
    pub entries: Vec<LogEntry>,
}

impl Output for JournalList {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        if self.entries.is_empty() {
            return format!("No journal entries in {}", self.path);
        }
        let mut lines = vec![format!(
            "{} of {} entries ({})",
            self.entries.len(),
            self.total,
            self.path
        )];
        lines.extend(self.entries.iter().map(|e| {
            format!(
                "  {}  {}",
                e.timestamp.format("%Y-%m-%d %H:%M:%S"),
                e.emotion_name
            )
        }));
        lines.join("\n")
    }
}

/// Journal entries in append order, optionally only the last `limit`.
pub fn journal(ctx: &Context, limit: Option<usize>) -> Result<JournalList> {
    let mut entries = ctx.journal.load_all()?;
    let total = entries.len();
    if let Some(limit) = limit {
        entries.drain(..total.saturating_sub(limit));
    }
    Ok(JournalList {
        path: ctx.journal.location(),
        total,
        entries,
    })
}

// === Diagnostics ===

#[derive(Debug, Serialize)]
pub struct DoctorResult {
    pub ok: bool,
    pub emotions: usize,
    pub issues: Vec<DataIssue>,
}

impl Output for DoctorResult {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        if self.ok {
            return format!("OK: {} emotions, no issues found", self.emotions);
        }
        let mut lines = vec![format!("{} issue(s) found:", self.issues.len())];
        lines.extend(self.issues.iter().map(|i| format!("  {}", i)));
        lines.join("\n")
    }
}

/// Check the loaded taxonomy.
pub fn doctor(ctx: &Context) -> DoctorResult {
    let issues = data::validate(&ctx.data);
    DoctorResult {
        ok: issues.is_empty(),
        emotions: ctx.emotions().len(),
        issues,
    }
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub value: String,
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct ConfigShow {
    pub journal_path: ConfigEntry,
    pub emotions_path: ConfigEntry,
    pub output_format: ConfigEntry,
    pub backup_corrupt: ConfigEntry,
}

impl Output for ConfigShow {
    fn to_json(&self) -> String {
        to_json(self)
    }

    fn to_human(&self) -> String {
        [
            ("journal-path", &self.journal_path),
            ("emotions-path", &self.emotions_path),
            ("output-format", &self.output_format),
            ("backup-corrupt", &self.backup_corrupt),
        ]
        .iter()
        .map(|(name, entry)| format!("{:<15} {}  [{}]", name, entry.value, entry.source))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Resolved configuration values with their sources.
pub fn config_show(config: &ResolvedConfig) -> ConfigShow {
    let entry = |value: String, source: &config::ValueSource| ConfigEntry {
        value,
        source: source.to_string(),
    };
    ConfigShow {
        journal_path: entry(
            config.journal_path().display().to_string(),
            &config.journal_path.source,
        ),
        emotions_path: match config.emotions_path {
            Some(ref path) => entry(path.value.display().to_string(), &path.source),
            None => entry("(built-in)".to_string(), &config::ValueSource::Default),
        },
        output_format: entry(
            config.output_format().to_string(),
            &config.output_format.source,
        ),
        backup_corrupt: entry(
            config.backup_corrupt().to_string(),
            &config.backup_corrupt.source,
        ),
    }
}
