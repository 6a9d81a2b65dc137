//! Non-blocking user notifications.
//!
//! Outcomes that are not tied to a panel (credential saves, connection
//! tests) are queued here with a severity. The web page drains the queue into
//! toasts on the next paint; the CLI prints them as they arrive.
use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    /// Bootstrap contextual class for a toast of this severity.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// FIFO queue of pending notifications.
#[derive(Debug, Default)]
pub struct Notifier {
    queue: VecDeque<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        self.queue.push_back(Notification {
            severity,
            message: message.into(),
            created_at: Utc::now(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Severity::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message);
    }

    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remove and return everything queued, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_in_push_order() {
        let mut notifier = Notifier::new();
        notifier.success("Google Ads connected successfully!");
        notifier.error("Network error testing Meta Ads connection");

        let drained = notifier.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].severity, Severity::Success);
        assert_eq!(drained[1].message, "Network error testing Meta Ads connection");
        assert!(notifier.is_empty());
    }

    #[test]
    fn error_maps_to_danger_class() {
        assert_eq!(Severity::Error.css_class(), "danger");
        assert_eq!(Severity::Info.css_class(), "info");
    }
}
