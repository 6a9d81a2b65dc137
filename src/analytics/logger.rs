use std::fs::{self, OpenOptions, create_dir_all};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::schema::LoggingConfig;

// ---------------------------------------------------------------------------
// Request log entry (JSONL)
// ---------------------------------------------------------------------------

/// A single entry in the request log.
///
/// One line per backend call, recording the endpoint, how the call ended and
/// how long it took. Read back by the reporter for `campaign-assistant activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLogEntry {
    pub timestamp: String,
    pub method: String,
    pub path: String,
    /// `"ok"`, `"rejected"` (server said `success: false`), `"transport"` or
    /// `"malformed"`.
    pub outcome: String,
    pub latency_ms: u64,
    /// HTTP status, when a response was received.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl RequestLogEntry {
    pub fn new(method: &str, path: &str, outcome: &str, latency_ms: u64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            method: method.to_string(),
            path: path.to_string(),
            outcome: outcome.to_string(),
            latency_ms,
            status: None,
            error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.outcome == "ok"
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Best-effort JSONL writer. Failures to write are silently ignored so that
/// logging never interferes with a request.
#[derive(Debug, Clone)]
pub struct RequestLogger {
    path: Option<PathBuf>,
}

impl RequestLogger {
    pub fn from_config(config: &LoggingConfig) -> Self {
        let path = if config.enabled {
            expand_home(&config.path)
        } else {
            None
        };
        Self { path }
    }

    /// A logger that writes nothing.
    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    pub fn record(&self, entry: &RequestLogEntry) {
        let _ = self.append(entry);
    }

    fn append(&self, entry: &RequestLogEntry) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        let json = serde_json::to_string(entry)?;
        writeln!(file, "{json}")?;

        Ok(())
    }

    /// Read all entries. Silently skips malformed lines; returns an empty vec
    /// if the file does not exist.
    pub fn read_all(&self) -> Vec<RequestLogEntry> {
        let Some(path) = &self.path else {
            return Vec::new();
        };

        let Ok(file) = fs::File::open(path) else {
            return Vec::new();
        };

        BufReader::new(file)
            .lines()
            .map_while(Result::ok)
            .filter_map(|line| serde_json::from_str::<RequestLogEntry>(&line).ok())
            .collect()
    }

    /// Read entries from the last `days` days (all entries when `None`).
    pub fn read_since_days(&self, days: Option<u32>) -> Vec<RequestLogEntry> {
        let entries = self.read_all();

        let Some(days) = days else {
            return entries;
        };

        let cutoff = (Utc::now() - chrono::Duration::days(i64::from(days))).to_rfc3339();
        entries
            .into_iter()
            .filter(|e| e.timestamp >= cutoff)
            .collect()
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> Option<PathBuf> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|home| home.join(rest)),
        None if path == "~" => dirs::home_dir(),
        None => Some(PathBuf::from(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_log(name: &str) -> PathBuf {
        let path = std::env::temp_dir()
            .join("campaign-assistant-tests")
            .join(format!("{name}-{}.jsonl", std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn record_then_read_back() {
        let path = temp_log("record");
        let logger = RequestLogger::at(&path);

        let mut entry = RequestLogEntry::new("POST", "/generate-report", "rejected", 120);
        entry.status = Some(400);
        entry.error = Some("Missing required fields: budget".to_string());
        logger.record(&entry);
        logger.record(&RequestLogEntry::new("GET", "/ads/status", "ok", 15));

        let entries = logger.read_all();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].status, Some(400));
        assert!(entries[1].is_ok());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn disabled_logger_writes_nothing() {
        let logger = RequestLogger::disabled();
        logger.record(&RequestLogEntry::new("GET", "/ads/status", "ok", 1));
        assert!(logger.read_all().is_empty());
    }

    #[test]
    fn read_skips_malformed_lines() {
        let path = temp_log("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let good = serde_json::to_string(&RequestLogEntry::new("GET", "/ads/status", "ok", 3)).unwrap();
        fs::write(&path, format!("not json\n{good}\n")).unwrap();

        let entries = RequestLogger::at(&path).read_all();
        assert_eq!(entries.len(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn expand_home_leaves_plain_paths() {
        assert_eq!(expand_home("/tmp/x.jsonl"), Some(PathBuf::from("/tmp/x.jsonl")));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/a/b"), Some(home.join("a/b")));
        }
    }
}
