//! File logging for the hook binary.
//!
//! Hooks talk to Claude Code over stdout/stderr, so traces go to
//! `~/.claude/notify/notify-hook.log` instead. The returned guard must stay
//! alive until exit or buffered lines are dropped.

use std::env;

use fs_err as fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub fn init() -> Option<WorkerGuard> {
    let log_dir = dirs::home_dir()?.join(".claude").join("notify");
    fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::never(log_dir, "notify-hook.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let debug_enabled = env::var("NOTIFY_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    let filter = if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
