//! Core library for tiered Claude Code notifications.
//!
//! Shared by the `notify-hook` binary and its internally spawned delayed
//! worker. The binary classifies hook events; this crate owns the pieces:
//!
//! - [`activity`]: persistent session-activity timestamps + idle check
//! - [`config`]: notification preferences (`~/.claude/notification_config.json`)
//! - [`event`]: hook payload model and activity/notification classification
//! - [`tiers`]: delivery back-ends (desktop banner, ntfy push)
//! - [`router`]: tier registry, immediate sends, deferred snapshots
//!
//! Everything below the hook entry point is fire-and-forget: store, tier,
//! and router APIs return booleans or nothing and never propagate errors.

pub mod activity;
pub mod config;
pub mod error;
pub mod event;
pub mod router;
pub mod tiers;

pub use activity::ActivityStore;
pub use config::NotifyConfig;
pub use error::{NotifyError, Result};
pub use event::HookInput;
pub use router::{DeferredRequest, DeferredScheduler, Notifier};
pub use tiers::NotificationTier;
