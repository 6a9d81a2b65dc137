/// Configuration schema and defaults for campaign-assistant.
///
/// Defines the TOML-serializable configuration structure with the sections
/// `[backend]`, `[features]`, `[rendering]`, `[web]` and `[logging]`.
///
/// Every field has a built-in default. Users only need to set the values they
/// want to override.
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration.
///
/// Maps directly to `~/.campaign-assistant/config.toml` and
/// `.campaign-assistant.toml`. All sections and fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub backend: BackendConfig,
    pub features: FeaturesConfig,
    pub rendering: RenderingConfig,
    pub web: WebConfig,
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// [backend]
// ---------------------------------------------------------------------------

/// Where the report/credentials backend lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL; endpoint paths such as `/generate-report` are appended.
    pub url: String,
    /// Overall request timeout in milliseconds. `0` waits for the backend
    /// indefinitely.
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// [features]
// ---------------------------------------------------------------------------

/// Optional controller modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Ad-platform status badges, credential forms and connection tests.
    pub integrations: bool,
    /// Deep audience insights form and renderer.
    pub audience_insights: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            integrations: true,
            audience_insights: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [rendering]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Interpolate backend strings into HTML without escaping. Only safe when
    /// the backend never echoes user-supplied text.
    pub trust_backend_html: bool,
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Listen address for `campaign-assistant serve`.
    pub addr: String,
    /// Open the page in the default browser on start.
    pub open_browser: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:9747".to_string(),
            open_browser: true,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Request log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether backend calls are appended to the request log.
    pub enabled: bool,
    /// Path to the JSONL request log. `~` is expanded to the home directory.
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "~/.campaign-assistant/requests.jsonl".to_string(),
        }
    }
}

impl AssistantConfig {
    /// Annotated default config, written by `campaign-assistant config init`.
    pub fn default_toml() -> String {
        r#"# campaign-assistant configuration
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (CAMPAIGN_ASSISTANT_*)
#   2. Project config (.campaign-assistant.toml in current directory)
#   3. User global config (~/.campaign-assistant/config.toml)
#   4. Built-in defaults

[backend]
url = "http://127.0.0.1:5000"
timeout_ms = 0              # 0 = wait indefinitely

[features]
integrations = true        # Google Ads / Meta Ads status and credentials
audience_insights = true   # Deep audience insights form

[rendering]
trust_backend_html = false # true = insert backend text into HTML unescaped

[web]
addr = "127.0.0.1:9747"
open_browser = true

[logging]
enabled = true
path = "~/.campaign-assistant/requests.jsonl"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
