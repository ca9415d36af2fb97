//! Tier registry and notification routing.
//!
//! The [`Notifier`] holds the configured tiers keyed by name. Enabled tiers
//! split into two groups: immediate tiers fire synchronously in configured
//! order, while deferred tiers (enabled ∩ `delayed_tiers`) are snapshotted
//! into a [`DeferredRequest`] and handed to a [`DeferredScheduler`] (a
//! detached worker process in production, a recording fake in tests).
//!
//! Partial failure is folded into one boolean: `send_tiered` is true when
//! at least one immediate tier delivered. The deferred handoff happens
//! regardless of the immediate outcome.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::NotifyConfig;
use crate::tiers::{build_tier, NotificationTier};

/// Immutable snapshot captured when a deferred dispatch is scheduled.
///
/// Carries everything the detached worker needs: it re-reads nothing from
/// the parent except the shared activity file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeferredRequest {
    pub title: String,
    pub message: String,
    pub session_id: String,
    /// Doubles as the sleep duration and the idle threshold at wake time,
    /// so any activity during the wait window suppresses the send.
    pub delay_seconds: u64,
    /// Deferred tier names with their config snapshots, in configured order.
    pub tiers: Vec<(String, Value)>,
}

/// Seam between routing and process spawning. The production impl lives in
/// the hook binary (it re-invokes its own executable).
pub trait DeferredScheduler {
    /// Launches the delayed check-and-maybe-send task. Fire-and-forget:
    /// true means launched, not delivered.
    fn schedule(&self, request: &DeferredRequest) -> bool;
}

pub struct Notifier {
    config: NotifyConfig,
    tiers: HashMap<String, Box<dyn NotificationTier>>,
}

const KNOWN_TIERS: [&str; 2] = ["desktop", "ntfy"];

impl Notifier {
    pub fn new() -> Self {
        Notifier::with_config(NotifyConfig::load())
    }

    pub fn with_config(config: NotifyConfig) -> Self {
        let mut tiers: HashMap<String, Box<dyn NotificationTier>> = HashMap::new();
        for name in KNOWN_TIERS {
            let tier_config = config.tier_configs.get(name).cloned().unwrap_or(Value::Null);
            if let Some(tier) = build_tier(name, &tier_config) {
                tiers.insert(name.to_string(), tier);
            }
        }
        Notifier { config, tiers }
    }

    /// Registers (or replaces) a tier implementation under a name.
    pub fn register_tier(&mut self, name: &str, tier: Box<dyn NotificationTier>) {
        self.tiers.insert(name.to_string(), tier);
    }

    pub fn config(&self) -> &NotifyConfig {
        &self.config
    }

    /// Sends through one named tier, or the configured default when no name
    /// is given. Unknown, disabled, and unavailable tiers fail with a
    /// diagnostic.
    pub fn send_via(&self, title: &str, message: &str, tier: Option<&str>) -> bool {
        let name = tier.unwrap_or(&self.config.default_tier);

        let Some(tier) = self.tiers.get(name) else {
            eprintln!("Warning: Notification tier '{}' not found", name);
            return false;
        };
        if !self.config.enabled_tiers.iter().any(|t| t == name) {
            eprintln!("Warning: Notification tier '{}' is disabled", name);
            return false;
        }
        if !tier.is_available() {
            eprintln!("Warning: Notification tier '{}' is not available", name);
            return false;
        }

        tier.send(title, message)
    }

    /// Fires immediate tiers now and schedules deferred tiers for the
    /// delayed idle check. Returns true when at least one immediate tier
    /// delivered; the deferred handoff is independent of that outcome.
    pub fn send_tiered(
        &self,
        title: &str,
        message: &str,
        session_id: Option<&str>,
        scheduler: &dyn DeferredScheduler,
    ) -> bool {
        let mut success = false;

        for name in self.immediate_tiers() {
            let Some(tier) = self.tiers.get(name) else {
                continue;
            };
            if !tier.is_available() {
                continue;
            }
            if tier.send(title, message) {
                success = true;
            }
        }

        if let Some(session_id) = session_id {
            if let Some(request) = self.deferred_request(title, message, session_id) {
                scheduler.schedule(&request);
            }
        }

        if !success {
            eprintln!("Warning: No immediate notification tiers available");
        }

        success
    }

    fn immediate_tiers(&self) -> impl Iterator<Item = &String> {
        self.config
            .enabled_tiers
            .iter()
            .filter(|name| !self.config.delayed_tiers.contains(name))
    }

    /// Builds the deferred snapshot, or None when no enabled tier is in the
    /// delayed set.
    fn deferred_request(
        &self,
        title: &str,
        message: &str,
        session_id: &str,
    ) -> Option<DeferredRequest> {
        let tiers: Vec<(String, Value)> = self
            .config
            .enabled_tiers
            .iter()
            .filter(|name| self.config.delayed_tiers.contains(name))
            .map(|name| {
                let tier_config = self
                    .config
                    .tier_configs
                    .get(name)
                    .cloned()
                    .unwrap_or(Value::Null);
                (name.clone(), tier_config)
            })
            .collect();

        if tiers.is_empty() {
            return None;
        }

        Some(DeferredRequest {
            title: title.to_string(),
            message: message.to_string(),
            session_id: session_id.to_string(),
            delay_seconds: self.config.delay_seconds,
            tiers,
        })
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Notifier::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct FakeTier {
        available: bool,
        succeed: bool,
        sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl FakeTier {
        fn boxed(available: bool, succeed: bool) -> (Box<dyn NotificationTier>, SentLog) {
            let sent = Arc::new(Mutex::new(Vec::new()));
            let tier = FakeTier {
                available,
                succeed,
                sent: Arc::clone(&sent),
            };
            (Box::new(tier), sent)
        }
    }

    type SentLog = Arc<Mutex<Vec<(String, String)>>>;

    impl NotificationTier for FakeTier {
        fn send(&self, title: &str, message: &str) -> bool {
            self.sent
                .lock()
                .unwrap()
                .push((title.to_string(), message.to_string()));
            self.succeed
        }

        fn is_available(&self) -> bool {
            self.available
        }
    }

    #[derive(Default)]
    struct RecordingScheduler {
        scheduled: Mutex<Vec<DeferredRequest>>,
    }

    impl DeferredScheduler for RecordingScheduler {
        fn schedule(&self, request: &DeferredRequest) -> bool {
            self.scheduled.lock().unwrap().push(request.clone());
            true
        }
    }

    fn config(enabled: &[&str], delayed: &[&str]) -> NotifyConfig {
        NotifyConfig {
            enabled_tiers: enabled.iter().map(|s| s.to_string()).collect(),
            delayed_tiers: delayed.iter().map(|s| s.to_string()).collect(),
            ..NotifyConfig::default()
        }
    }

    #[test]
    fn test_send_tiered_empty_enabled_set_returns_false_with_no_sends() {
        let mut notifier = Notifier::with_config(config(&[], &[]));
        let (tier, sent) = FakeTier::boxed(true, true);
        notifier.register_tier("desktop", tier);
        let scheduler = RecordingScheduler::default();

        assert!(!notifier.send_tiered("t", "m", Some("s1"), &scheduler));
        assert!(sent.lock().unwrap().is_empty());
        assert!(scheduler.scheduled.lock().unwrap().is_empty());
    }

    #[test]
    fn test_send_tiered_inclusive_or_over_immediate_tiers() {
        let mut notifier = Notifier::with_config(config(&["desktop", "ntfy"], &[]));
        let (failing, failing_log) = FakeTier::boxed(true, false);
        let (succeeding, succeeding_log) = FakeTier::boxed(true, true);
        notifier.register_tier("desktop", failing);
        notifier.register_tier("ntfy", succeeding);
        let scheduler = RecordingScheduler::default();

        assert!(notifier.send_tiered("t", "m", None, &scheduler));
        assert_eq!(failing_log.lock().unwrap().len(), 1);
        assert_eq!(succeeding_log.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_send_tiered_skips_unavailable_tier() {
        let mut notifier = Notifier::with_config(config(&["desktop"], &[]));
        let (tier, sent) = FakeTier::boxed(false, true);
        notifier.register_tier("desktop", tier);
        let scheduler = RecordingScheduler::default();

        assert!(!notifier.send_tiered("t", "m", None, &scheduler));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_send_tiered_schedules_deferred_snapshot() {
        let mut cfg = config(&["desktop", "ntfy"], &["ntfy"]);
        cfg.delay_seconds = 45;
        cfg.tier_configs.insert(
            "ntfy".to_string(),
            serde_json::json!({"topic": "my-alerts"}),
        );
        let mut notifier = Notifier::with_config(cfg);
        let (desktop, _) = FakeTier::boxed(true, true);
        notifier.register_tier("desktop", desktop);
        let scheduler = RecordingScheduler::default();

        assert!(notifier.send_tiered("Title", "Body", Some("s1"), &scheduler));

        let scheduled = scheduler.scheduled.lock().unwrap();
        assert_eq!(scheduled.len(), 1);
        let request = &scheduled[0];
        assert_eq!(request.title, "Title");
        assert_eq!(request.message, "Body");
        assert_eq!(request.session_id, "s1");
        assert_eq!(request.delay_seconds, 45);
        assert_eq!(request.tiers.len(), 1);
        assert_eq!(request.tiers[0].0, "ntfy");
        assert_eq!(request.tiers[0].1["topic"], serde_json::json!("my-alerts"));
    }

    #[test]
    fn test_send_tiered_schedules_even_when_immediate_fails() {
        let mut notifier = Notifier::with_config(config(&["desktop", "ntfy"], &["ntfy"]));
        let (desktop, _) = FakeTier::boxed(true, false);
        notifier.register_tier("desktop", desktop);
        let scheduler = RecordingScheduler::default();

        assert!(!notifier.send_tiered("t", "m", Some("s1"), &scheduler));
        assert_eq!(scheduler.scheduled.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_send_tiered_without_session_id_skips_deferred() {
        let mut notifier = Notifier::with_config(config(&["desktop", "ntfy"], &["ntfy"]));
        let (desktop, _) = FakeTier::boxed(true, true);
        notifier.register_tier("desktop", desktop);
        let scheduler = RecordingScheduler::default();

        assert!(notifier.send_tiered("t", "m", None, &scheduler));
        assert!(scheduler.scheduled.lock().unwrap().is_empty());
    }

    #[test]
    fn test_deferred_set_is_intersection_with_enabled() {
        // ntfy is delayed but not enabled, so nothing is scheduled
        let mut notifier = Notifier::with_config(config(&["desktop"], &["ntfy"]));
        let (desktop, _) = FakeTier::boxed(true, true);
        notifier.register_tier("desktop", desktop);
        let scheduler = RecordingScheduler::default();

        assert!(notifier.send_tiered("t", "m", Some("s1"), &scheduler));
        assert!(scheduler.scheduled.lock().unwrap().is_empty());
    }

    #[test]
    fn test_send_via_unknown_tier_fails() {
        let notifier = Notifier::with_config(config(&["desktop"], &[]));
        assert!(!notifier.send_via("t", "m", Some("carrier-pigeon")));
    }

    #[test]
    fn test_send_via_disabled_tier_fails() {
        let mut notifier = Notifier::with_config(config(&["ntfy"], &[]));
        let (desktop, sent) = FakeTier::boxed(true, true);
        notifier.register_tier("desktop", desktop);

        assert!(!notifier.send_via("t", "m", Some("desktop")));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_send_via_unavailable_tier_fails() {
        let mut notifier = Notifier::with_config(config(&["desktop"], &[]));
        let (desktop, sent) = FakeTier::boxed(false, true);
        notifier.register_tier("desktop", desktop);

        assert!(!notifier.send_via("t", "m", Some("desktop")));
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_send_via_uses_default_tier_when_unnamed() {
        let mut notifier = Notifier::with_config(config(&["desktop"], &[]));
        let (desktop, sent) = FakeTier::boxed(true, true);
        notifier.register_tier("desktop", desktop);

        assert!(notifier.send_via("Title", "Body", None));
        assert_eq!(
            sent.lock().unwrap().as_slice(),
            &[("Title".to_string(), "Body".to_string())]
        );
    }
}
