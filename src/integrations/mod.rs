//! Ad-platform connection status, credential forms and connection tests.
//!
//! The manager mirrors the backend's `GET /ads/status` record locally and
//! derives one [`Badge`] per platform from it. Credential saves move the badge
//! through `Testing` while the request is in flight.
use std::fmt::Write as _;

use crate::api::Backend;
use crate::model::{ConnectionStatus, FormInput, Platform};
use crate::notify::Notifier;
use crate::render::escape;
use crate::render::html::title_case_id;

pub const NO_PLATFORMS_MESSAGE: &str =
    "No advertising platforms connected. Add your credentials below to unlock data-driven insights.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Connected,
    Disconnected,
    Testing,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Self::Connected => "Connected",
            Self::Disconnected => "Disconnected",
            Self::Testing => "Testing...",
        }
    }

    fn css_class(self) -> &'static str {
        match self {
            Self::Connected => "status-connected",
            Self::Disconnected => "status-disconnected",
            Self::Testing => "status-testing",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Connected => "fas fa-check-circle",
            Self::Disconnected => "fas fa-times-circle",
            Self::Testing => "fas fa-spinner fa-spin",
        }
    }
}

/// The "connected" summary line and whether it is a warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSummary {
    pub connected: bool,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct IntegrationManager {
    status: ConnectionStatus,
    badges: [Option<Badge>; 2],
    drafts: [FormInput; 2],
}

fn slot(platform: Platform) -> usize {
    match platform {
        Platform::GoogleAds => 0,
        Platform::MetaAds => 1,
    }
}

impl IntegrationManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    /// Replace the local status wholesale and recompute badges.
    pub fn apply_status(&mut self, status: ConnectionStatus) {
        self.status = status;
        self.badges = [None, None];
    }

    /// Fetch `GET /ads/status`. On any failure the previous status is kept.
    ///
    /// Returns whether the local status was updated.
    pub fn refresh(&mut self, backend: &impl Backend) -> bool {
        match backend.connection_status() {
            Ok(response) if response.success => {
                self.apply_status(response.status.unwrap_or_default());
                true
            }
            Ok(response) => {
                eprintln!(
                    "[campaign-assistant] failed to check connection status: {}",
                    response.error.as_deref().unwrap_or("unknown error")
                );
                false
            }
            Err(e) => {
                eprintln!("[campaign-assistant] failed to check connection status: {e}");
                false
            }
        }
    }

    pub fn badge(&self, platform: Platform) -> Badge {
        self.badges[slot(platform)].unwrap_or(if self.status.is_connected(platform) {
            Badge::Connected
        } else {
            Badge::Disconnected
        })
    }

    /// The credential form is hidden once the platform is connected.
    pub fn form_visible(&self, platform: Platform) -> bool {
        !self.status.is_connected(platform)
    }

    /// Values currently typed into a platform's credential form.
    pub fn draft(&self, platform: Platform) -> &FormInput {
        &self.drafts[slot(platform)]
    }

    pub fn summary(&self) -> StatusSummary {
        let total = self.status.total_connected;
        if total == 0 {
            return StatusSummary {
                connected: false,
                message: NO_PLATFORMS_MESSAGE.to_string(),
            };
        }

        let names = self
            .status
            .connected_platforms
            .iter()
            .map(|id| title_case_id(id))
            .collect::<Vec<_>>()
            .join(", ");
        let plural = if total > 1 { "s" } else { "" };
        StatusSummary {
            connected: true,
            message: format!("Connected to {total} platform{plural}: {names}"),
        }
    }

    /// Save credentials for `platform`.
    ///
    /// On success the form is cleared and the status refreshed. Failures put
    /// the badge back to `Disconnected` and keep the typed values.
    pub fn submit_credentials(
        &mut self,
        backend: &impl Backend,
        platform: Platform,
        form: &FormInput,
        notifier: &mut Notifier,
    ) {
        self.begin_submit(platform, form);
        self.finish_submit(backend, platform, notifier);
    }

    /// Keep `form` as the platform's draft and mark the badge `Testing`
    /// until [`Self::finish_submit`] runs.
    pub fn begin_submit(&mut self, platform: Platform, form: &FormInput) {
        self.drafts[slot(platform)] = form.clone();
        self.badges[slot(platform)] = Some(Badge::Testing);
    }

    /// Send the stored draft and settle the badge.
    pub fn finish_submit(
        &mut self,
        backend: &impl Backend,
        platform: Platform,
        notifier: &mut Notifier,
    ) {
        let name = platform.display_name();
        let outcome = backend.save_credentials(platform, &self.drafts[slot(platform)]);

        match outcome {
            Ok(response) if response.success => {
                self.drafts[slot(platform)].clear();
                self.badges[slot(platform)] = None;
                self.refresh(backend);
                notifier.success(format!("{name} connected successfully!"));
            }
            Ok(response) => {
                self.badges[slot(platform)] = Some(Badge::Disconnected);
                notifier.error(
                    response
                        .error
                        .unwrap_or_else(|| format!("Failed to connect {name}")),
                );
            }
            Err(_) => {
                self.badges[slot(platform)] = Some(Badge::Disconnected);
                notifier.error(format!("Network error connecting to {name}"));
            }
        }
    }

    /// Ask the backend to verify stored credentials. Does not change state.
    pub fn test_connection(
        &self,
        backend: &impl Backend,
        platform: Platform,
        notifier: &mut Notifier,
    ) {
        let name = platform.display_name();
        match backend.test_credentials(platform) {
            Ok(response) if response.success => {
                notifier.success(format!("{name} connection test successful!"));
            }
            Ok(response) => notifier.error(format!(
                "{name} connection test failed: {}",
                response.error.as_deref().unwrap_or("Unknown error")
            )),
            Err(_) => notifier.error(format!("Network error testing {name} connection")),
        }
    }

    /// Integrations card: summary alert plus one block per platform.
    pub fn render_html(&self) -> String {
        let mut out = String::from(
            "<section id=\"integrations\" class=\"card\">\
             <h2><i class=\"fas fa-plug\"></i> Ad Platform Integrations</h2>",
        );

        let summary = self.summary();
        let (alert, icon) = if summary.connected {
            ("alert-success", "fas fa-check-circle")
        } else {
            ("alert-warning", "fas fa-exclamation-triangle")
        };
        let _ = write!(
            out,
            "<div id=\"connectionStatus\"><div class=\"alert {alert}\"><i class=\"{icon}\"></i> {}</div></div>",
            escape(&summary.message)
        );

        for platform in Platform::ALL {
            self.render_platform(&mut out, platform);
        }

        out.push_str("</section>\n");
        out
    }

    fn render_platform(&self, out: &mut String, platform: Platform) {
        let badge = self.badge(platform);
        let camel = match platform {
            Platform::GoogleAds => "googleAds",
            Platform::MetaAds => "metaAds",
        };
        let _ = write!(
            out,
            "<div class=\"platform\"><div id=\"{camel}Status\"><strong>{}</strong> \
             <span class=\"status-badge {}\"><i class=\"{}\"></i> {}</span></div>",
            platform.display_name(),
            badge.css_class(),
            badge.icon(),
            badge.label()
        );

        let hidden = if self.form_visible(platform) { "" } else { " d-none" };
        let _ = write!(
            out,
            "<form id=\"{camel}Form\" class=\"credentials{hidden}\" method=\"post\" action=\"/integrations/{}\">",
            platform.slug()
        );
        let draft = self.draft(platform);
        for field in platform.credential_fields() {
            let kind = if field.contains("secret") || field.contains("token") {
                "password"
            } else {
                "text"
            };
            let _ = write!(
                out,
                "<div class=\"form-group\"><label for=\"{camel}-{field}\">{}</label>\
                 <input type=\"{kind}\" class=\"form-control\" id=\"{camel}-{field}\" name=\"{field}\" value=\"{}\" required></div>",
                title_case_id(field),
                escape(draft.get(field).unwrap_or(""))
            );
        }
        let _ = write!(
            out,
            "<button type=\"submit\" class=\"btn btn-primary\">Connect {}</button></form>\
             <form method=\"post\" action=\"/integrations/{}/test\">\
             <button type=\"submit\" class=\"btn btn-secondary\">Test Connection</button></form></div>",
            platform.display_name(),
            platform.slug()
        );
    }
}
