//! Error types shared across the controller seams.
use thiserror::Error;

/// Failure to obtain a well-formed envelope from the backend.
///
/// A server-reported logical failure (`success: false`) is *not* an error at
/// this level: the envelope decoded fine, and the caller decides what message
/// to show.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("network error calling {path}: {reason}")]
    Transport { path: String, reason: String },

    #[error("malformed response from {path}: {reason}")]
    Malformed { path: String, reason: String },
}

impl RequestError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}
