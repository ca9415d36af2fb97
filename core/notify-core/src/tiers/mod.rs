//! Notification delivery back-ends.
//!
//! Each tier is one independent delivery mechanism behind the
//! [`NotificationTier`] capability trait. Tiers never propagate errors:
//! `send` and `is_available` fold every failure (missing helper binary,
//! network error, non-success status) into a boolean, so one broken tier
//! can never take down the hook response or the other tiers.

mod desktop;
mod push;

pub use desktop::DesktopTier;
pub use push::{PushConfig, PushTier};

use serde_json::Value;

pub trait NotificationTier {
    /// Attempts delivery. True only on confirmed success.
    fn send(&self, title: &str, message: &str) -> bool;

    /// Best-effort probe of whether this tier can currently be used.
    fn is_available(&self) -> bool;
}

/// Resolves a configured tier name to its implementation.
///
/// This is the single name→back-end mapping used both by the router and by
/// the detached delayed worker when it replays a deferred snapshot. Unknown
/// names yield None and are skipped by callers.
pub fn build_tier(name: &str, config: &Value) -> Option<Box<dyn NotificationTier>> {
    match name {
        "desktop" => Some(Box::new(DesktopTier)),
        "ntfy" => Some(Box::new(PushTier::from_value(config))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tier_knows_desktop_and_ntfy() {
        assert!(build_tier("desktop", &Value::Null).is_some());
        assert!(build_tier("ntfy", &Value::Null).is_some());
    }

    #[test]
    fn test_build_tier_rejects_unknown_name() {
        assert!(build_tier("carrier-pigeon", &Value::Null).is_none());
    }
}
