//! Deep audience insights: request building and the insights panel.
use std::fmt::Write as _;

use serde::Serialize;

use crate::api::Backend;
use crate::model::FormInput;
use crate::render::{InsightsRenderer, escape};

pub const DEFAULT_AUDIENCE_SIZE: i64 = 10_000;
pub const MISSING_AUDIENCE_MESSAGE: &str = "Please provide a target audience description";
pub const INSIGHTS_FAILED_MESSAGE: &str = "Failed to generate audience insights";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error occurred. Please try again.";

const IDLE_LABEL: &str = "Generate Deep Insights";
const BUSY_LABEL: &str = "Generating Insights...";

/// JSON body for `POST /audience-insights`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightsRequest {
    pub target_audience: String,
    pub budget: Option<f64>,
    pub estimated_audience_size: i64,
    pub campaign_name: String,
    pub objectives: String,
    pub include_real_data: bool,
}

impl InsightsRequest {
    /// Build a request from the insights form.
    ///
    /// Fails with the inline message when the audience description is blank.
    /// An unparseable budget is sent as `null`; a missing or zero audience
    /// size falls back to [`DEFAULT_AUDIENCE_SIZE`].
    pub fn from_form(form: &FormInput) -> Result<Self, &'static str> {
        let target_audience = form.get("target_audience").unwrap_or("");
        if target_audience.trim().is_empty() {
            return Err(MISSING_AUDIENCE_MESSAGE);
        }

        let budget = form
            .get("budget")
            .and_then(|b| b.trim().parse::<f64>().ok())
            .filter(|b| b.is_finite());
        let estimated_audience_size = form
            .get("estimated_audience_size")
            .and_then(|s| whole_number(s.trim()))
            .filter(|&n| n != 0)
            .unwrap_or(DEFAULT_AUDIENCE_SIZE);

        Ok(Self {
            target_audience: target_audience.to_string(),
            budget,
            estimated_audience_size,
            campaign_name: form.get("campaign_name").unwrap_or("").to_string(),
            objectives: form.get("objectives").unwrap_or("").to_string(),
            include_real_data: form.get("include_real_data") == Some("on"),
        })
    }
}

/// An integer, or a finite decimal truncated toward zero (`"12500.5"` → 12500).
fn whole_number(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(|n| n.trunc() as i64)
    })
}

/// State of the insights form and its results area.
#[derive(Debug, Default)]
pub struct InsightsPanel {
    busy: bool,
    error: Option<String>,
    results_html: Option<String>,
    draft: FormInput,
}

impl InsightsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn results_html(&self) -> Option<&str> {
        self.results_html.as_deref()
    }

    pub fn button_label(&self) -> &'static str {
        if self.busy { BUSY_LABEL } else { IDLE_LABEL }
    }

    /// Validate, send and render. Earlier results stay visible on failure.
    pub fn submit(&mut self, backend: &impl Backend, form: &FormInput, renderer: &InsightsRenderer) {
        self.draft = form.clone();
        let request = match InsightsRequest::from_form(form) {
            Ok(request) => request,
            Err(message) => {
                self.error = Some(message.to_string());
                return;
            }
        };

        self.busy = true;
        self.error = None;

        match backend.audience_insights(&request) {
            Ok(response) if response.success => {
                let insights = response.insights.unwrap_or_default();
                self.results_html = Some(renderer.render(&insights));
            }
            Ok(response) => {
                self.error = Some(
                    response
                        .error
                        .unwrap_or_else(|| INSIGHTS_FAILED_MESSAGE.to_string()),
                );
            }
            Err(_) => self.error = Some(NETWORK_ERROR_MESSAGE.to_string()),
        }

        self.busy = false;
    }

    /// Insights card: the form, an optional error banner and the results.
    pub fn render_html(&self) -> String {
        let value = |name: &str| escape(self.draft.get(name).unwrap_or("")).into_owned();
        let checked = if self.draft.get("include_real_data") == Some("on") {
            " checked"
        } else {
            ""
        };
        let disabled = if self.busy { " disabled" } else { "" };
        let spinner = if self.busy { "spinner" } else { "spinner d-none" };

        let mut out = String::new();
        let _ = write!(
            out,
            "<section id=\"audienceInsights\" class=\"card\">\
             <h2><i class=\"fas fa-brain\"></i> Deep Audience Insights</h2>\
             <form id=\"audienceInsightsForm\" method=\"post\" action=\"/insights\">\
             <div class=\"form-group\"><label for=\"ai-target_audience\">Target Audience</label>\
             <textarea class=\"form-control\" id=\"ai-target_audience\" name=\"target_audience\" rows=\"3\" required>{}</textarea></div>\
             <div class=\"form-group\"><label for=\"ai-budget\">Budget ($)</label>\
             <input type=\"number\" class=\"form-control\" id=\"ai-budget\" name=\"budget\" value=\"{}\"></div>\
             <div class=\"form-group\"><label for=\"ai-size\">Estimated Audience Size</label>\
             <input type=\"number\" class=\"form-control\" id=\"ai-size\" name=\"estimated_audience_size\" placeholder=\"10000\" value=\"{}\"></div>\
             <div class=\"form-group\"><label for=\"ai-campaign_name\">Campaign Name</label>\
             <input type=\"text\" class=\"form-control\" id=\"ai-campaign_name\" name=\"campaign_name\" value=\"{}\"></div>\
             <div class=\"form-group\"><label for=\"ai-objectives\">Objectives</label>\
             <textarea class=\"form-control\" id=\"ai-objectives\" name=\"objectives\" rows=\"2\">{}</textarea></div>\
             <div class=\"form-group\"><label><input type=\"checkbox\" name=\"include_real_data\"{checked}> \
             Include real ad platform data</label></div>\
             <button type=\"submit\" class=\"btn btn-primary\" id=\"generateInsightsBtn\"{disabled}>\
             <span class=\"{spinner}\"></span> <span class=\"button-text\">{}</span></button>",
            value("target_audience"),
            value("budget"),
            value("estimated_audience_size"),
            value("campaign_name"),
            value("objectives"),
            self.button_label(),
        );
        if let Some(error) = &self.error {
            let _ = write!(
                out,
                "<div id=\"audienceInsightsError\" class=\"alert alert-danger\">\
                 <i class=\"fas fa-exclamation-triangle\"></i> {}</div>",
                escape(error)
            );
        }
        out.push_str("</form>");

        let results_class = if self.results_html.is_some() { "" } else { " d-none" };
        let _ = write!(
            out,
            "<div id=\"audienceInsightsResults\" class=\"insights-results{results_class}\">\
             <div class=\"insights-content\">{}</div></div></section>\n",
            self.results_html.as_deref().unwrap_or("")
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_audience_is_rejected() {
        let form = FormInput::from_pairs([("target_audience", "   ")]);
        assert_eq!(InsightsRequest::from_form(&form), Err(MISSING_AUDIENCE_MESSAGE));
    }

    #[test]
    fn defaults_are_applied() {
        let form = FormInput::from_pairs([("target_audience", "Gamers"), ("budget", "")]);
        let request = InsightsRequest::from_form(&form).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "target_audience": "Gamers",
                "budget": null,
                "estimated_audience_size": 10000,
                "campaign_name": "",
                "objectives": "",
                "include_real_data": false
            })
        );
    }

    #[test]
    fn checkbox_and_numbers_are_parsed() {
        let form = FormInput::from_pairs([
            ("target_audience", "Parents of toddlers"),
            ("budget", "2500.5"),
            ("estimated_audience_size", "50000"),
            ("include_real_data", "on"),
        ]);
        let request = InsightsRequest::from_form(&form).unwrap();
        assert_eq!(request.budget, Some(2500.5));
        assert_eq!(request.estimated_audience_size, 50_000);
        assert!(request.include_real_data);
    }

    #[test]
    fn zero_audience_size_falls_back() {
        let form = FormInput::from_pairs([("target_audience", "x"), ("estimated_audience_size", "0")]);
        let request = InsightsRequest::from_form(&form).unwrap();
        assert_eq!(request.estimated_audience_size, DEFAULT_AUDIENCE_SIZE);
    }

    #[test]
    fn decimal_audience_size_is_truncated() {
        let form = FormInput::from_pairs([
            ("target_audience", "x"),
            ("estimated_audience_size", "12500.5"),
        ]);
        let request = InsightsRequest::from_form(&form).unwrap();
        assert_eq!(request.estimated_audience_size, 12_500);

        let form = FormInput::from_pairs([
            ("target_audience", "x"),
            ("estimated_audience_size", "lots"),
        ]);
        let request = InsightsRequest::from_form(&form).unwrap();
        assert_eq!(request.estimated_audience_size, DEFAULT_AUDIENCE_SIZE);
    }

    #[test]
    fn idle_panel_hides_results() {
        let panel = InsightsPanel::new();
        assert_eq!(panel.button_label(), "Generate Deep Insights");
        let html = panel.render_html();
        assert!(html.contains("class=\"insights-results d-none\""));
        assert!(!html.contains("audienceInsightsError"));
    }
}
