//! File-backed session activity tracking.
//!
//! The store is a single JSON object in `~/.claude/session_activity.json`
//! mapping session id → last-activity time (f64 epoch seconds). Every hook
//! invocation on the host shares it, including detached delayed workers, so
//! writes go through a temp file + atomic rename: concurrent writers may
//! lose a key to last-writer-wins, but readers never see a half-written
//! file.
//!
//! # Defensive Design
//!
//! Tracking is best-effort by policy:
//! - `mark_activity` swallows every failure; it must never delay or fail
//!   the hook response.
//! - `is_idle` fails open toward idle: a missing file, corrupt JSON, or an
//!   unknown session all read as "idle". Absent evidence of activity the
//!   system prefers to notify rather than silently suppress.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs_err as fs;
use tempfile::NamedTempFile;

use crate::config;
use crate::error::{NotifyError, Result};

/// Handle to the shared activity file. Stateless between calls: every
/// operation re-reads the file, so a fresh timestamp written by another
/// process is always observed.
pub struct ActivityStore {
    path: PathBuf,
}

impl ActivityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ActivityStore { path: path.into() }
    }

    /// Store at the per-user location, or None when HOME is unresolvable.
    pub fn at_default_path() -> Option<Self> {
        config::activity_file_path().map(ActivityStore::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records "this session is active right now". Best-effort: any I/O or
    /// parse failure is swallowed.
    pub fn mark_activity(&self, session_id: &str) {
        if let Err(err) = self.try_mark_activity(session_id) {
            tracing::debug!(error = %err, session = %session_id, "Activity tracking skipped");
        }
    }

    fn try_mark_activity(&self, session_id: &str) -> Result<()> {
        let mut entries = self.load();
        entries.insert(session_id.to_string(), now_epoch());
        self.save(&entries)
    }

    /// Returns true unless a fresh-enough entry exists for the session.
    ///
    /// Fresh means `now - last_activity <= threshold_seconds`; strictly
    /// older entries, unknown sessions, and unreadable files are all idle.
    pub fn is_idle(&self, session_id: &str, threshold_seconds: u64) -> bool {
        match self.load().get(session_id) {
            Some(last_activity) => now_epoch() - last_activity > threshold_seconds as f64,
            None => true,
        }
    }

    /// Reads the whole map, treating missing/empty/corrupt files as empty.
    fn load(&self) -> HashMap<String, f64> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return HashMap::new(),
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    fn save(&self, entries: &HashMap<String, f64>) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| NotifyError::Io {
            context: "Activity file path has no parent directory".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        fs::create_dir_all(parent).map_err(|e| NotifyError::Io {
            context: format!("Failed to create {}", parent.display()),
            source: e,
        })?;

        let content = serde_json::to_string(entries).map_err(|e| NotifyError::Json {
            context: "Failed to serialize activity map".to_string(),
            source: e,
        })?;

        let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| NotifyError::Io {
            context: "Failed to create temp activity file".to_string(),
            source: e,
        })?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| NotifyError::Io {
                context: "Failed to write temp activity file".to_string(),
                source: e,
            })?;
        temp_file.persist(&self.path).map_err(|e| NotifyError::Io {
            context: format!("Failed to replace {}", self.path.display()),
            source: e.error,
        })?;

        Ok(())
    }
}

fn now_epoch() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
