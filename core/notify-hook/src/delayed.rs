//! Delayed dispatch worker.
//!
//! Deferred tiers must fire only if the session stays idle through the
//! delay window, and the hook process must return to Claude Code
//! immediately. So the scheduler re-invokes this same binary as a fully
//! detached `delayed-send` process that carries its inputs as a JSON
//! payload. There is no daemon, and the child inherits no pipes that could
//! block on closure. The parent never waits on the child.
//!
//! ## Worker lifecycle
//!
//! 1. Sleep for `delay_seconds`.
//! 2. Re-read the activity store; the idle threshold is the same
//!    `delay_seconds`, so any activity recorded during the wait window
//!    suppresses the send.
//! 3. If idle, attempt each deferred tier in snapshot order, best-effort.
//!
//! Nothing is reported back; the worker's only observable effect is a
//! notification or silence.

use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use notify_core::tiers::build_tier;
use notify_core::{ActivityStore, DeferredRequest, DeferredScheduler};

/// Schedules deferred requests by spawning a detached `delayed-send`
/// worker from the current executable.
pub struct SpawnScheduler;

impl DeferredScheduler for SpawnScheduler {
    fn schedule(&self, request: &DeferredRequest) -> bool {
        match spawn_worker(request) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(error = %err, "Failed to spawn delayed worker");
                false
            }
        }
    }
}

fn spawn_worker(request: &DeferredRequest) -> Result<(), String> {
    let exe = std::env::current_exe()
        .map_err(|e| format!("Failed to resolve current executable: {}", e))?;
    let payload = serde_json::to_string(request)
        .map_err(|e| format!("Failed to serialize deferred request: {}", e))?;

    let mut command = Command::new(exe);
    command
        .arg("delayed-send")
        .arg("--payload")
        .arg(payload)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    // New process group: the worker must outlive the hook process and any
    // signal sent to its group
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    command
        .spawn()
        .map(drop)
        .map_err(|e| format!("Failed to spawn delayed worker: {}", e))
}

/// Entry point for the `delayed-send` subcommand.
pub fn run(payload: &str) {
    let request: DeferredRequest = match serde_json::from_str(payload) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "Malformed delayed-send payload");
            return;
        }
    };

    thread::sleep(Duration::from_secs(request.delay_seconds));

    deliver_if_idle(&request, ActivityStore::at_default_path().as_ref());
}

/// The post-sleep half of the worker, split out so tests can drive it
/// against a store in a temp directory.
///
/// An unresolvable store (no home directory) fails open toward idle, the
/// same way an unreadable activity file does: absent evidence of activity,
/// prefer to notify.
fn deliver_if_idle(request: &DeferredRequest, store: Option<&ActivityStore>) {
    let idle = store.map_or(true, |store| {
        store.is_idle(&request.session_id, request.delay_seconds)
    });
    if !idle {
        tracing::debug!(
            session = %request.session_id,
            "Session active during delay window, suppressing notification"
        );
        return;
    }

    for (name, tier_config) in &request.tiers {
        match build_tier(name, tier_config) {
            Some(tier) => {
                let delivered = tier.send(&request.title, &request.message);
                tracing::debug!(tier = %name, delivered, "Delayed send attempted");
            }
            None => tracing::debug!(tier = %name, "Unknown deferred tier, skipping"),
        }
    }
}
