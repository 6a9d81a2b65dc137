/// Configuration system for campaign-assistant.
///
/// Provides a layered configuration hierarchy:
///
/// 1. **Built-in defaults**: [`schema::AssistantConfig::default()`]
/// 2. **User global config**: `~/.campaign-assistant/config.toml`
/// 3. **Project local config**: `.campaign-assistant.toml` in the working directory
/// 4. **Environment variables**: `CAMPAIGN_ASSISTANT_*` overrides (highest precedence)
///
/// Each TOML layer is deserialized with defaults for missing keys, so a later
/// file replaces the earlier one wholesale; in practice users set a handful of
/// keys and the rest match the defaults anyway.
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub use schema::AssistantConfig;

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Load the fully resolved configuration: defaults → global TOML → project
/// TOML → env vars.
pub fn load() -> AssistantConfig {
    let mut config = AssistantConfig::default();

    if let Some(global) = load_toml_file(global_config_path()) {
        config = global;
    }

    if let Some(project) = load_toml_file(project_config_path()) {
        config = project;
    }

    apply_env_overrides(&mut config);

    config
}

/// Load a TOML config file. Missing or malformed files yield `None`.
fn load_toml_file(path: Option<PathBuf>) -> Option<AssistantConfig> {
    let path = path?;
    let content = fs::read_to_string(&path).ok()?;
    toml::from_str(&content).ok()
}

// ---------------------------------------------------------------------------
// File paths
// ---------------------------------------------------------------------------

fn global_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".campaign-assistant").join("config.toml"))
}

fn project_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(".campaign-assistant.toml"))
}

/// Path to the global config file, for display and `config init`.
pub fn global_config_file() -> Option<PathBuf> {
    global_config_path()
}

/// Path to the project config file, for display.
pub fn project_config_file() -> Option<PathBuf> {
    project_config_path()
}

// ---------------------------------------------------------------------------
// Environment variable overrides
// ---------------------------------------------------------------------------

/// Apply environment variable overrides (highest precedence layer).
///
/// Supported variables:
/// - `CAMPAIGN_ASSISTANT_BACKEND_URL`: backend base URL
/// - `CAMPAIGN_ASSISTANT_TIMEOUT_MS`: request timeout
/// - `CAMPAIGN_ASSISTANT_INTEGRATIONS`: enable the integrations module
/// - `CAMPAIGN_ASSISTANT_AUDIENCE_INSIGHTS`: enable the insights module
/// - `CAMPAIGN_ASSISTANT_TRUST_HTML`: render backend text unescaped
/// - `CAMPAIGN_ASSISTANT_WEB_ADDR`: listen address for `serve`
/// - `CAMPAIGN_ASSISTANT_LOG`: request log on/off
fn apply_env_overrides(config: &mut AssistantConfig) {
    if let Ok(val) = std::env::var("CAMPAIGN_ASSISTANT_BACKEND_URL")
        && !val.is_empty()
    {
        config.backend.url = val;
    }
    if let Ok(val) = std::env::var("CAMPAIGN_ASSISTANT_TIMEOUT_MS")
        && let Ok(ms) = val.parse::<u64>()
    {
        config.backend.timeout_ms = ms;
    }
    if let Ok(val) = std::env::var("CAMPAIGN_ASSISTANT_INTEGRATIONS") {
        config.features.integrations = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("CAMPAIGN_ASSISTANT_AUDIENCE_INSIGHTS") {
        config.features.audience_insights = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("CAMPAIGN_ASSISTANT_TRUST_HTML") {
        config.rendering.trust_backend_html = is_truthy(&val);
    }
    if let Ok(val) = std::env::var("CAMPAIGN_ASSISTANT_WEB_ADDR")
        && !val.is_empty()
    {
        config.web.addr = val;
    }
    if let Ok(val) = std::env::var("CAMPAIGN_ASSISTANT_LOG") {
        config.logging.enabled = is_truthy(&val);
    }
}

/// Check if a string value represents a truthy boolean.
fn is_truthy(val: &str) -> bool {
    matches!(
        val.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

// ---------------------------------------------------------------------------
// Config init / set / reset
// ---------------------------------------------------------------------------

/// Write the annotated default config to the global config path.
///
/// Fails if the file already exists unless `force` is set.
pub fn init_config(force: bool) -> Result<PathBuf> {
    let path = global_config_path().context("could not determine home directory")?;

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    write_config_file(&path, &AssistantConfig::default_toml())?;
    Ok(path)
}

/// Set a single dotted key (e.g. `backend.url`) in the global config file.
///
/// Starts from the existing file, or from the serialized defaults when there
/// is none, so the written file always contains the full set of sections.
pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let path = global_config_path().context("could not determine home directory")?;

    let content = if path.exists() {
        fs::read_to_string(&path).context("failed to read config file")?
    } else {
        toml::to_string_pretty(&AssistantConfig::default())
            .context("failed to serialize default config")?
    };

    let mut root: toml::Value =
        toml::from_str(&content).context("failed to parse config as TOML value")?;
    set_toml_value(&mut root, key, value)?;

    root.clone()
        .try_into::<AssistantConfig>()
        .with_context(|| format!("'{value}' is not a valid value for '{key}'"))?;

    let output = toml::to_string_pretty(&root).context("failed to serialize updated config")?;
    write_config_file(&path, &output)
}

fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create config directory")?;
    }
    fs::write(path, content).context("failed to write config file")
}

/// Set a value in a TOML value tree using a dotted key path.
///
/// The existing value's type decides how `raw_value` is parsed; unknown keys
/// are rejected.
fn set_toml_value(root: &mut toml::Value, key: &str, raw_value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((leaf, sections)) = parts.split_last() else {
        anyhow::bail!("empty config key");
    };

    let mut current = root;
    for &part in sections {
        current = current
            .get_mut(part)
            .with_context(|| format!("config key not found: section '{part}' in '{key}'"))?;
    }

    let table = current.as_table_mut().with_context(|| {
        format!(
            "expected table at '{}'",
            key.rsplit_once('.').map(|(s, _)| s).unwrap_or("")
        )
    })?;

    let new_value = match table.get(*leaf) {
        Some(toml::Value::Boolean(_)) => toml::Value::Boolean(is_truthy(raw_value)),
        Some(toml::Value::Integer(_)) => {
            let n: i64 = raw_value
                .parse()
                .with_context(|| format!("expected integer for '{key}', got '{raw_value}'"))?;
            toml::Value::Integer(n)
        }
        Some(toml::Value::String(_)) => toml::Value::String(raw_value.to_string()),
        Some(_) => anyhow::bail!("config key '{key}' cannot be set from the command line"),
        None => anyhow::bail!("unknown config key: '{key}'"),
    };

    table.insert((*leaf).to_string(), new_value);
    Ok(())
}

/// Reset the global config to defaults (overwrite the file).
pub fn reset_config() -> Result<PathBuf> {
    init_config(true)
}

/// The effective (fully resolved) config as TOML.
pub fn show_effective_config() -> Result<String> {
    let config = load();
    toml::to_string_pretty(&config).context("failed to serialize effective config")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_truthy_accepts_variants() {
        assert!(is_truthy("1"));
        assert!(is_truthy("TRUE"));
        assert!(is_truthy("yes"));
        assert!(is_truthy("On"));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("off"));
        assert!(!is_truthy(""));
    }

    fn defaults_as_value() -> toml::Value {
        let text = toml::to_string_pretty(&AssistantConfig::default()).unwrap();
        toml::from_str(&text).unwrap()
    }

    #[test]
    fn set_toml_value_updates_string() {
        let mut root = defaults_as_value();
        set_toml_value(&mut root, "backend.url", "https://reports.example.com").unwrap();
        assert_eq!(
            root["backend"]["url"].as_str(),
            Some("https://reports.example.com")
        );
    }

    #[test]
    fn set_toml_value_updates_bool_and_integer() {
        let mut root = defaults_as_value();
        set_toml_value(&mut root, "features.integrations", "off").unwrap();
        set_toml_value(&mut root, "backend.timeout_ms", "5000").unwrap();
        assert_eq!(root["features"]["integrations"].as_bool(), Some(false));
        assert_eq!(root["backend"]["timeout_ms"].as_integer(), Some(5000));
    }

    #[test]
    fn set_toml_value_rejects_unknown_keys() {
        let mut root = defaults_as_value();
        assert!(set_toml_value(&mut root, "nonexistent.key", "x").is_err());
        assert!(set_toml_value(&mut root, "backend.retries", "3").is_err());
        assert!(set_toml_value(&mut root, "", "x").is_err());
    }

    #[test]
    fn set_toml_value_rejects_bad_integer() {
        let mut root = defaults_as_value();
        assert!(set_toml_value(&mut root, "backend.timeout_ms", "soon").is_err());
    }

    #[test]
    fn show_effective_config_round_trips() {
        let toml_str = show_effective_config().unwrap();
        let _: AssistantConfig = toml::from_str(&toml_str).unwrap();
    }
}
