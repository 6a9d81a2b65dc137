//! Request activity log and its summaries.
//!
//! Every backend call made through [`crate::api::HttpBackend`] is appended to
//! a JSONL log (`~/.campaign-assistant/requests.jsonl` by default). The
//! reporter aggregates that log for `campaign-assistant activity`.

pub mod logger;
pub mod reporter;
