//! CLI command implementations for the campaign assistant.
//!
//! Provides subcommand handlers for:
//! - `campaign-assistant report`: validate and generate a campaign report
//! - `campaign-assistant insights`: deep audience insights
//! - `campaign-assistant status | connect | test-connection`: ad platforms
//! - `campaign-assistant campaigns [show <id> | reports]`: saved campaigns and reports
//! - `campaign-assistant render`: render a saved payload offline
//! - `campaign-assistant serve`: local web UI
//! - `campaign-assistant activity`: request log summary
//! - `campaign-assistant config show|init|set|reset`: configuration management

use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;
use serde_json::Value;

use campaign_assistant::analytics::logger::RequestLogger;
use campaign_assistant::analytics::reporter::{self, ActivitySummary};
use campaign_assistant::api::{Backend, HttpBackend};
use campaign_assistant::config;
use campaign_assistant::controller::Controller;
use campaign_assistant::integrations::{Badge, IntegrationManager};
use campaign_assistant::model::{FormInput, InsightsPayload, Platform, ReportPayload};
use campaign_assistant::notify::{Notification, Severity};
use campaign_assistant::render::html::format_count;
use campaign_assistant::render::{HtmlPolicy, InsightsRenderer, ReportRenderer, plain_text};
use campaign_assistant::view::Panel;
use campaign_assistant::web;

/// Output format for rendered documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Html,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("html") => Self::Html,
            _ => Self::Text,
        }
    }
}

fn print_document(html: &str, format: OutputFormat) {
    match format {
        OutputFormat::Html => println!("{html}"),
        OutputFormat::Text => println!("{}", plain_text(html)),
    }
}

fn form_from(fields: &[(&str, Option<String>)]) -> FormInput {
    FormInput::from_pairs(
        fields
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (*name, v.as_str()))),
    )
}

fn print_notifications(notifications: &[Notification]) {
    for note in notifications {
        let line = match note.severity {
            Severity::Success => format!("✓ {}", note.message).green(),
            Severity::Error => format!("✗ {}", note.message).red(),
            Severity::Warning => format!("! {}", note.message).yellow(),
            Severity::Info => note.message.normal(),
        };
        println!("{line}");
    }
}

// ---------------------------------------------------------------------------
// campaign-assistant report
// ---------------------------------------------------------------------------

/// Validate the campaign fields and generate a report.
pub fn run_report(fields: &[(&str, Option<String>)], format: OutputFormat) -> Result<()> {
    let config = config::load();
    let mut controller = Controller::new(HttpBackend::from_config(&config), &config);
    let form = form_from(fields);

    let view = controller.submit_report(&form)?.clone();
    if view.panel == Panel::Report {
        if let Some(html) = &view.report_html {
            print_document(html, format);
        }
        if let Some(id) = controller.last_campaign_id() {
            eprintln!("{}", format!("Saved as campaign #{id}").dimmed());
        }
        return Ok(());
    }

    let message = view
        .error_message
        .clone()
        .unwrap_or_else(|| "report generation failed".to_string());
    let state = controller.form();
    for rule in state.rules() {
        if let Some(error) = state.error(rule.name) {
            eprintln!("  {} {:<16} {}", "✗".red().bold(), rule.name, error);
        }
    }
    Err(anyhow!(message))
}

// ---------------------------------------------------------------------------
// campaign-assistant insights
// ---------------------------------------------------------------------------

/// Generate deep audience insights.
pub fn run_insights(fields: &[(&str, Option<String>)], format: OutputFormat) -> Result<()> {
    let mut config = config::load();
    config.features.audience_insights = true;
    let mut controller = Controller::new(HttpBackend::from_config(&config), &config);

    let panel = controller.submit_insights(&form_from(fields))?;
    if let Some(error) = panel.error() {
        bail!("{error}");
    }
    if let Some(html) = panel.results_html() {
        print_document(html, format);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// campaign-assistant status | connect | test-connection
// ---------------------------------------------------------------------------

/// Show ad platform connection status.
pub fn run_status() -> Result<()> {
    let config = config::load();
    let backend = HttpBackend::from_config(&config);
    let response = backend.connection_status()?;
    if !response.success {
        bail!(
            "{}",
            response
                .error
                .unwrap_or_else(|| "failed to check connection status".to_string())
        );
    }

    let mut manager = IntegrationManager::new();
    manager.apply_status(response.status.unwrap_or_default());

    println!("{}", "Ad Platform Connections".bold().cyan());
    println!("{}", "=".repeat(40));
    for platform in Platform::ALL {
        let label = badge_label(manager.badge(platform));
        let account = manager
            .status()
            .platform(platform)
            .and_then(|p| p.account_id.as_ref())
            .map(|id| format!("account {}", id.display()))
            .unwrap_or_default();
        println!("  {:<12} {:<14} {}", platform.display_name(), label, account.dimmed());
    }
    println!();

    let summary = manager.summary();
    if summary.connected {
        println!("  {}", summary.message.green());
    } else {
        println!("  {}", summary.message.yellow());
    }
    Ok(())
}

fn badge_label(badge: Badge) -> colored::ColoredString {
    match badge {
        Badge::Connected => badge.label().green(),
        Badge::Disconnected => badge.label().red(),
        Badge::Testing => badge.label().yellow(),
    }
}

fn parse_platform(value: &str) -> Result<Platform> {
    Platform::parse(value)
        .ok_or_else(|| anyhow!("unknown platform `{value}` (expected google-ads or meta-ads)"))
}

/// Save credentials for a platform.
pub fn run_connect(platform: &str, fields: &[String]) -> Result<()> {
    let platform = parse_platform(platform)?;

    let mut form = FormInput::new();
    for field in fields {
        let (name, value) = field
            .split_once('=')
            .ok_or_else(|| anyhow!("invalid field `{field}` (expected NAME=VALUE)"))?;
        form.set(name.trim(), value);
    }

    let missing: Vec<_> = platform
        .credential_fields()
        .iter()
        .filter(|name| form.get(name).is_none_or(|v| v.trim().is_empty()))
        .collect();
    if !missing.is_empty() {
        let names = missing.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ");
        println!("{} missing fields: {}", "!".yellow().bold(), names.yellow());
    }

    let mut config = config::load();
    config.features.integrations = true;
    let mut controller = Controller::new(HttpBackend::from_config(&config), &config);
    let manager = controller.begin_credentials(platform, &form)?;
    println!(
        "  {:<12} {}",
        platform.display_name(),
        badge_label(manager.badge(platform))
    );
    controller.finish_credentials(platform)?;
    if let Some(manager) = controller.integrations() {
        println!(
            "  {:<12} {}",
            platform.display_name(),
            badge_label(manager.badge(platform))
        );
    }
    print_notifications(&controller.take_notifications());
    Ok(())
}

/// Test stored credentials for a platform.
pub fn run_test_connection(platform: &str) -> Result<()> {
    let platform = parse_platform(platform)?;
    let mut config = config::load();
    config.features.integrations = true;
    let mut controller = Controller::new(HttpBackend::from_config(&config), &config);
    controller.test_connection(platform)?;
    print_notifications(&controller.take_notifications());
    Ok(())
}

// ---------------------------------------------------------------------------
// campaign-assistant campaigns
// ---------------------------------------------------------------------------

/// List saved campaigns, newest first as the backend returns them.
pub fn run_campaigns() -> Result<()> {
    let config = config::load();
    let response = HttpBackend::from_config(&config).list_campaigns()?;
    if !response.success {
        bail!(
            "{}",
            response
                .error
                .unwrap_or_else(|| "failed to list campaigns".to_string())
        );
    }

    if response.campaigns.is_empty() {
        println!("{}", "No campaigns yet. Generate a report to create one.".yellow());
        return Ok(());
    }

    println!("{}", "Saved Campaigns".bold().cyan());
    println!("{}", "=".repeat(70));
    println!(
        "  {:>5} {:<28} {:>12} {:>6}  Created",
        "ID", "Campaign", "Budget", "Days"
    );
    println!("  {}", "-".repeat(68));

    for (i, campaign) in response.campaigns.iter().enumerate() {
        let name = campaign
            .campaign_name
            .as_ref()
            .map(|n| n.display())
            .unwrap_or_default();
        let line = format!(
            "  {:>5} {:<28} {:>12} {:>6}  {}",
            campaign.id.map(|id| id.to_string()).unwrap_or_default(),
            truncate(&name, 28),
            campaign
                .budget
                .map(|b| format!("${}", format_count(b)))
                .unwrap_or_default(),
            campaign.duration.map(|d| d.to_string()).unwrap_or_default(),
            campaign
                .created_at
                .as_ref()
                .map(|c| c.display())
                .unwrap_or_default(),
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
    Ok(())
}

/// Show one campaign and render each report saved for it.
pub fn run_campaign_show(id: i64, format: OutputFormat) -> Result<()> {
    let config = config::load();
    let response = HttpBackend::from_config(&config).get_campaign(id)?;
    if !response.success {
        bail!(
            "{}",
            response
                .error
                .unwrap_or_else(|| format!("failed to fetch campaign {id}"))
        );
    }
    let detail = response
        .campaign
        .with_context(|| format!("backend returned no campaign for id {id}"))?;

    let name = detail
        .campaign
        .campaign_name
        .as_ref()
        .map(|n| n.display())
        .unwrap_or_else(|| format!("Campaign #{id}"));
    println!("{}", name.bold().cyan());
    println!("{}", "=".repeat(50));
    if let Some(audience) = &detail.campaign.target_audience {
        println!("  Audience:   {}", audience.display());
    }
    if let Some(budget) = detail.campaign.budget {
        println!("  Budget:     ${}", format_count(budget));
    }
    if let Some(days) = detail.campaign.duration {
        println!("  Duration:   {days} days");
    }
    println!();

    if detail.reports.is_empty() {
        println!("{}", "No reports saved for this campaign.".yellow());
        return Ok(());
    }

    let renderer = ReportRenderer::new(HtmlPolicy::from_config(&config.rendering));
    for saved in &detail.reports {
        let generated = saved
            .generated_at
            .as_ref()
            .map(|g| g.display())
            .unwrap_or_default();
        println!(
            "{} {}",
            format!("Report #{}", saved.id.unwrap_or_default()).bold(),
            generated.dimmed()
        );
        match &saved.report_data {
            Some(report) => print_document(&renderer.render(report), format),
            None => println!("{}", "(report data unavailable)".yellow()),
        }
        println!();
    }
    Ok(())
}

/// List every saved report.
pub fn run_reports() -> Result<()> {
    let config = config::load();
    let response = HttpBackend::from_config(&config).list_reports()?;
    if !response.success {
        bail!(
            "{}",
            response
                .error
                .unwrap_or_else(|| "failed to list reports".to_string())
        );
    }

    if response.reports.is_empty() {
        println!("{}", "No reports yet. Generate a report to create one.".yellow());
        return Ok(());
    }

    println!("{}", "Saved Reports".bold().cyan());
    println!("{}", "=".repeat(70));
    println!("  {:>5} {:>9}  {:<20} Summary", "ID", "Campaign", "Generated");
    println!("  {}", "-".repeat(68));
    for saved in &response.reports {
        let summary = saved
            .report_data
            .as_ref()
            .and_then(|r| r.executive_summary.as_ref())
            .map(|s| s.display())
            .unwrap_or_default();
        let generated = saved
            .generated_at
            .as_ref()
            .map(|g| g.display())
            .unwrap_or_default();
        println!(
            "  {:>5} {:>9}  {:<20} {}",
            saved.id.map(|id| id.to_string()).unwrap_or_default(),
            saved.campaign_id.map(|id| format!("#{id}")).unwrap_or_default(),
            truncate(&generated, 20),
            truncate(&summary, 36)
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// campaign-assistant render
// ---------------------------------------------------------------------------

/// Render a saved report or insights document.
///
/// Accepts either the bare payload or the full response envelope
/// (`{"success": true, "report": {...}}`).
pub fn run_render(kind: &str, file: &str, format: OutputFormat) -> Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;
    let mut value: Value =
        serde_json::from_str(&content).with_context(|| format!("{file} is not valid JSON"))?;

    let policy = HtmlPolicy::from_config(&config::load().rendering);
    let html = match kind {
        "report" => {
            if let Some(inner) = value.get_mut("report") {
                value = inner.take();
            }
            let report: ReportPayload =
                serde_json::from_value(value).context("failed to decode report")?;
            ReportRenderer::new(policy).render(&report)
        }
        "insights" => {
            if let Some(inner) = value.get_mut("insights") {
                value = inner.take();
            }
            let insights: InsightsPayload =
                serde_json::from_value(value).context("failed to decode insights")?;
            InsightsRenderer::new(policy).render(&insights)
        }
        other => bail!("unknown document kind `{other}` (expected report or insights)"),
    };

    print_document(&html, format);
    Ok(())
}

// ---------------------------------------------------------------------------
// campaign-assistant serve
// ---------------------------------------------------------------------------

/// Start the local web UI.
pub fn run_serve(addr: Option<String>, no_browser: bool) -> Result<()> {
    let mut config = config::load();
    if let Some(addr) = addr {
        config.web.addr = addr;
    }
    if no_browser {
        config.web.open_browser = false;
    }
    web::serve(&config)
}

// ---------------------------------------------------------------------------
// campaign-assistant activity
// ---------------------------------------------------------------------------

/// Summarize the request log.
pub fn run_activity(days: Option<u32>, format: &str) -> Result<()> {
    let config = config::load();
    let entries = RequestLogger::from_config(&config.logging).read_since_days(days);
    let summary = reporter::summarize(&entries);

    if summary.total_requests == 0 {
        println!(
            "{}",
            "No data yet. Backend requests are logged as you use the assistant.".yellow()
        );
        return Ok(());
    }

    match format {
        "json" => print_activity_json(&summary)?,
        _ => print_activity_table(&summary),
    }
    Ok(())
}

fn print_activity_table(summary: &ActivitySummary) {
    println!("{}", "Backend Request Activity".bold().cyan());
    println!("{}", "=".repeat(60));
    println!();
    println!("  {} {}", "Total requests:".bold(), format_number(summary.total_requests));
    println!(
        "  {} {} ({:.1}%)",
        "Failed:        ".bold(),
        format_number(summary.failed_requests),
        summary.failure_pct()
    );
    println!();

    println!(
        "  {:<32} {:>6} {:>6} {:>8} {:>10}",
        "Endpoint", "Count", "OK", "Failed", "Avg ms"
    );
    println!("  {}", "-".repeat(66));
    for (i, stat) in summary.endpoints.iter().enumerate() {
        let line = format!(
            "  {:<32} {:>6} {:>6} {:>8} {:>10.0}",
            truncate(&stat.endpoint, 32),
            stat.count,
            stat.ok,
            stat.failures(),
            stat.avg_latency_ms,
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_activity_json(summary: &ActivitySummary) -> Result<()> {
    let value = serde_json::json!({
        "total_requests": summary.total_requests,
        "failed_requests": summary.failed_requests,
        "failure_pct": summary.failure_pct(),
        "endpoints": summary.endpoints.iter().map(|e| serde_json::json!({
            "endpoint": e.endpoint,
            "count": e.count,
            "ok": e.ok,
            "rejected": e.rejected,
            "transport": e.transport,
            "malformed": e.malformed,
            "avg_latency_ms": e.avg_latency_ms,
        })).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// campaign-assistant config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source(global_exists, "~/.campaign-assistant/config.toml");
    print_source(project_exists, ".campaign-assistant.toml");
    println!(
        "  {} {}",
        "·".dimmed(),
        "CAMPAIGN_ASSISTANT_* environment variables".dimmed()
    );

    Ok(())
}

fn print_source(exists: bool, name: &str) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.campaign-assistant/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!("{} Config written to {}", "✓".green().bold(), path.display());
    println!("  {}", "Edit the file to point at your backend.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a number with comma separators for readability.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
