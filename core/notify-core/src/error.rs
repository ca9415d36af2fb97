//! Error types for notify-core operations.
//!
//! These only travel between internal helpers. Public store/tier/router
//! APIs convert every failure into a boolean or a silent no-op; the hook
//! entry point in the binary is the single place that surfaces errors.

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, NotifyError>;
