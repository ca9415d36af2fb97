//! Notification configuration loading.
//!
//! Preferences live in `~/.claude/notification_config.json`. The file is
//! optional: a missing, unreadable, or malformed file falls back to the
//! built-in defaults so a bad config can never break the hook response.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fs_err as fs;
use serde::{Deserialize, Serialize};

/// Returns the path to the Claude directory (~/.claude).
pub fn claude_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".claude"))
}

/// Returns the path to the notification configuration file.
pub fn config_file_path() -> Option<PathBuf> {
    claude_dir().map(|d| d.join("notification_config.json"))
}

/// Returns the path to the persisted session-activity file.
pub fn activity_file_path() -> Option<PathBuf> {
    claude_dir().map(|d| d.join("session_activity.json"))
}

/// Notification preferences, immutable for the lifetime of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Tiers allowed to fire, in immediate-send order.
    pub enabled_tiers: Vec<String>,
    /// Tier used by `send_via` when no explicit tier is named.
    pub default_tier: String,
    /// Per-tier settings, opaque to the router.
    pub tier_configs: HashMap<String, serde_json::Value>,
    /// Subset of tiers routed through the delayed idle-check path.
    pub delayed_tiers: Vec<String>,
    /// Delay before the detached worker re-checks idleness, in seconds.
    pub delay_seconds: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        NotifyConfig {
            enabled_tiers: vec!["desktop".to_string(), "ntfy".to_string()],
            default_tier: "desktop".to_string(),
            tier_configs: HashMap::new(),
            delayed_tiers: vec!["ntfy".to_string()],
            delay_seconds: 30,
        }
    }
}

impl NotifyConfig {
    /// Loads the configuration from the per-user location, or defaults.
    pub fn load() -> Self {
        config_file_path()
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    /// Loads from an explicit path, falling back to defaults on any failure.
    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }
}
