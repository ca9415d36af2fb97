//! Hook payload model.
//!
//! Claude Code delivers one JSON object per hook invocation. Two shapes
//! matter here:
//!
//! - activity events (PreToolUse/PostToolUse carry `tool_name`, Stop
//!   carries `stop_hook_active`): record last-activity time, send nothing
//! - notification events (everything else): optional `title`, `message`,
//!   `session_id`

use serde::Deserialize;

pub const DEFAULT_TITLE: &str = "Claude Code";
pub const DEFAULT_MESSAGE: &str = "Notification";

#[derive(Debug, Clone, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub stop_hook_active: Option<bool>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl HookInput {
    /// True for tool-use and stop hooks, which signal session activity
    /// rather than a user-facing notification.
    pub fn is_activity(&self) -> bool {
        self.tool_name.is_some() || self.stop_hook_active.is_some()
    }
}
