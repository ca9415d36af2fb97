//! Hook entry point.
//!
//! Reads one JSON event from stdin and classifies it:
//!
//! - activity event (`tool_name` or `stop_hook_active` present): record
//!   last-activity time for the session and exit 0, never notify
//! - notification event: fire immediate tiers, schedule deferred tiers,
//!   exit 0 iff any immediate tier delivered
//!
//! Malformed input and delivery failure both exit 1; only the diagnostic
//! text distinguishes them.

use std::io::{self, Read};

use notify_core::event::{DEFAULT_MESSAGE, DEFAULT_TITLE};
use notify_core::{ActivityStore, HookInput, Notifier};

use crate::delayed::SpawnScheduler;

pub fn run() -> Result<(), String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;

    run_on(&input)
}

fn run_on(input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err("Invalid hook input: empty stdin".to_string());
    }

    let hook_input: HookInput =
        serde_json::from_str(input).map_err(|e| format!("Invalid hook input: {}", e))?;

    dispatch(hook_input)
}

fn dispatch(input: HookInput) -> Result<(), String> {
    if input.is_activity() {
        if let Some(store) = ActivityStore::at_default_path() {
            record_activity(&input, &store);
        }
        return Ok(());
    }

    let title = input.title.as_deref().unwrap_or(DEFAULT_TITLE);
    let message = input.message.as_deref().unwrap_or(DEFAULT_MESSAGE);

    let notifier = Notifier::new();
    let sent = notifier.send_tiered(title, message, input.session_id.as_deref(), &SpawnScheduler);

    if sent {
        println!("Notification sent: {} - {}", title, message);
        Ok(())
    } else {
        Err("Failed to send notification".to_string())
    }
}

fn record_activity(input: &HookInput, store: &ActivityStore) {
    let Some(session_id) = &input.session_id else {
        tracing::debug!("Skipping activity event (missing session_id)");
        return;
    };
    store.mark_activity(session_id);
}
