//! Push notification tier (ntfy).
//!
//! Posts the message body to `{server}/{topic}` with title, priority, and
//! tags carried as headers. Success is exactly HTTP 200; everything else
//! (non-success status, DNS failure, timeout) reads as false. Timeouts are
//! bounded so a wedged server can never hang a hook invocation.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use super::NotificationTier;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    pub topic: String,
    pub server: String,
    pub priority: String,
    pub tags: String,
}

impl Default for PushConfig {
    fn default() -> Self {
        PushConfig {
            topic: "claude-code-notifications".to_string(),
            server: "https://ntfy.sh".to_string(),
            priority: "default".to_string(),
            tags: "claude".to_string(),
        }
    }
}

pub struct PushTier {
    config: PushConfig,
    agent: ureq::Agent,
}

impl PushTier {
    pub fn new(config: PushConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(SEND_TIMEOUT).build();
        PushTier { config, agent }
    }

    /// Builds from the tier's opaque config value; malformed settings fall
    /// back to the defaults rather than disabling the tier.
    pub fn from_value(value: &Value) -> Self {
        PushTier::new(serde_json::from_value(value.clone()).unwrap_or_default())
    }

    fn publish_url(&self) -> String {
        format!(
            "{}/{}",
            self.config.server.trim_end_matches('/'),
            self.config.topic
        )
    }
}

impl NotificationTier for PushTier {
    fn send(&self, title: &str, message: &str) -> bool {
        let response = self
            .agent
            .post(&self.publish_url())
            .set("Title", title)
            .set("Priority", &self.config.priority)
            .set("Tags", &self.config.tags)
            .send_string(message);

        match response {
            Ok(response) => response.status() == 200,
            Err(err) => {
                tracing::debug!(error = %err, "Push send failed");
                false
            }
        }
    }

    fn is_available(&self) -> bool {
        let response = self
            .agent
            .get(&self.config.server)
            .timeout(PROBE_TIMEOUT)
            .call();
        matches!(response, Ok(response) if response.status() == 200)
    }
}
