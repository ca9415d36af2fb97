//! Native desktop notification tier.
//!
//! macOS: `terminal-notifier` first (carries the Claude app identity so the
//! banner shows the right icon), `osascript display notification` as the
//! fallback when it is missing or fails. Other unixes use `notify-send`.
//! Child output is discarded so a chatty helper cannot block the hook.

use super::NotificationTier;

pub struct DesktopTier;

impl NotificationTier for DesktopTier {
    fn send(&self, title: &str, message: &str) -> bool {
        platform::send(title, message)
    }

    fn is_available(&self) -> bool {
        platform::is_available()
    }
}

/// Builds the AppleScript used by the osascript fallback. Title and message
/// are user-controlled, so quotes and backslashes must be escaped before
/// inlining.
fn display_notification_script(title: &str, message: &str) -> String {
    format!(
        "display notification \"{}\" with title \"{}\"",
        escape_applescript(message),
        escape_applescript(title)
    )
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(target_os = "macos")]
mod platform {
    use std::process::{Command, Stdio};

    pub(super) fn send(title: &str, message: &str) -> bool {
        let primary = Command::new("terminal-notifier")
            .args([
                "-title",
                title,
                "-message",
                message,
                "-sender",
                "com.anthropic.claudefordesktop",
            ])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        if matches!(primary, Ok(status) if status.success()) {
            return true;
        }

        let script = super::display_notification_script(title, message);
        let fallback = Command::new("osascript")
            .args(["-e", &script])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        matches!(fallback, Ok(status) if status.success())
    }

    pub(super) fn is_available() -> bool {
        let probe = Command::new("osascript")
            .args(["-e", ""])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        matches!(probe, Ok(status) if status.success())
    }
}

#[cfg(all(unix, not(target_os = "macos")))]
mod platform {
    use std::process::{Command, Stdio};

    pub(super) fn send(title: &str, message: &str) -> bool {
        let status = Command::new("notify-send")
            .args([title, message])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        matches!(status, Ok(status) if status.success())
    }

    pub(super) fn is_available() -> bool {
        let lookup = Command::new("which")
            .arg("notify-send")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        matches!(lookup, Ok(status) if status.success())
    }
}

#[cfg(not(unix))]
mod platform {
    pub(super) fn send(_title: &str, _message: &str) -> bool {
        false
    }

    pub(super) fn is_available() -> bool {
        false
    }
}
