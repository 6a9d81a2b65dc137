use std::fmt::Write as _;

use super::html::HtmlPolicy;
use crate::model::FieldValue;
use crate::model::report::{CampaignMetadata, ReportPayload};

/// Renders a [`ReportPayload`] into the report panel's HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportRenderer {
    policy: HtmlPolicy,
}

impl ReportRenderer {
    pub fn new(policy: HtmlPolicy) -> Self {
        Self { policy }
    }

    /// Header first, then the eight optional sections in fixed order.
    pub fn render(&self, report: &ReportPayload) -> String {
        let mut out = String::new();

        self.header(&mut out, report.campaign_metadata.as_ref());

        if let Some(summary) = &report.executive_summary {
            self.paragraph(&mut out, "Executive Summary", "fas fa-chart-bar", summary);
        }

        if let Some(budget) = &report.budget_analysis {
            self.metrics(
                &mut out,
                "Budget Analysis",
                "fas fa-dollar-sign",
                &[
                    ("Daily Budget", budget.daily_budget.as_ref()),
                    ("Channel Distribution", budget.channel_distribution.as_ref()),
                    ("ROI Projection", budget.roi_projection.as_ref()),
                ],
            );
        }

        if let Some(audience) = &report.audience_insights {
            self.details(
                &mut out,
                "Audience Insights",
                "fas fa-users",
                &[
                    ("Demographics", audience.demographics.as_ref()),
                    ("Behaviors", audience.behaviors.as_ref()),
                    ("Pain Points", audience.pain_points.as_ref()),
                ],
            );
        }

        if let Some(items) = &report.strategy_recommendations {
            self.list(&mut out, "Strategy Recommendations", "fas fa-lightbulb", items);
        }

        if let Some(channels) = &report.channel_optimization {
            self.details(
                &mut out,
                "Channel Optimization",
                "fas fa-broadcast-tower",
                &[
                    ("Primary Channels", channels.primary_channels.as_ref()),
                    ("Content Strategy", channels.content_strategy.as_ref()),
                    ("Timing", channels.timing_recommendations.as_ref()),
                ],
            );
        }

        if let Some(kpi) = &report.kpi_framework {
            self.details(
                &mut out,
                "KPI Framework",
                "fas fa-chart-pie",
                &[
                    ("Primary Metrics", kpi.primary_metrics.as_ref()),
                    ("Success Benchmarks", kpi.success_benchmarks.as_ref()),
                    ("Monitoring Frequency", kpi.monitoring_frequency.as_ref()),
                ],
            );
        }

        if let Some(risk) = &report.risk_assessment {
            self.details(
                &mut out,
                "Risk Assessment",
                "fas fa-shield-alt",
                &[
                    ("Potential Challenges", risk.potential_challenges.as_ref()),
                    ("Mitigation Strategies", risk.mitigation_strategies.as_ref()),
                ],
            );
        }

        if let Some(items) = &report.next_steps {
            self.list(&mut out, "Next Steps", "fas fa-arrow-right", items);
        }

        out
    }

    fn header(&self, out: &mut String, metadata: Option<&CampaignMetadata>) {
        let field = |pick: fn(&CampaignMetadata) -> Option<&FieldValue>| {
            self.policy.value_or(metadata.and_then(pick), "N/A")
        };
        let _ = writeln!(
            out,
            "<div class=\"report-header\"><h3 class=\"report-title\">\
             <i class=\"fas fa-chart-line me-2\"></i>Marketing Analysis Report</h3>\
             <p class=\"report-subtitle\">Campaign: {} | Budget: {} | Duration: {}</p></div>",
            field(|m| m.campaign_name.as_ref()),
            field(|m| m.budget.as_ref()),
            field(|m| m.duration.as_ref()),
        );
    }

    fn open(&self, out: &mut String, title: &str, icon: &str) {
        let _ = write!(
            out,
            "<div class=\"report-section\"><h4><i class=\"{icon}\"></i> {title}</h4>"
        );
    }

    fn close(&self, out: &mut String) {
        out.push_str("</div>\n");
    }

    fn paragraph(&self, out: &mut String, title: &str, icon: &str, content: &FieldValue) {
        self.open(out, title, icon);
        let _ = write!(out, "<p>{}</p>", self.policy.value(content));
        self.close(out);
    }

    /// Labelled paragraphs, one per present field.
    fn details(&self, out: &mut String, title: &str, icon: &str, rows: &[(&str, Option<&FieldValue>)]) {
        self.open(out, title, icon);
        for (label, value) in rows {
            if let Some(value) = value {
                let _ = write!(
                    out,
                    "<p><strong>{label}:</strong> {}</p>",
                    self.policy.value(value)
                );
            }
        }
        self.close(out);
    }

    /// Metric tiles, one per present field.
    fn metrics(&self, out: &mut String, title: &str, icon: &str, tiles: &[(&str, Option<&FieldValue>)]) {
        self.open(out, title, icon);
        out.push_str("<div class=\"metric-grid\">");
        for (label, value) in tiles {
            if let Some(value) = value {
                let _ = write!(
                    out,
                    "<div class=\"metric-item\"><div class=\"metric-label\">{label}</div>\
                     <div class=\"metric-value\">{}</div></div>",
                    self.policy.value(value)
                );
            }
        }
        out.push_str("</div>");
        self.close(out);
    }

    fn list(&self, out: &mut String, title: &str, icon: &str, items: &[FieldValue]) {
        self.open(out, title, icon);
        out.push_str("<ul>");
        for item in items.iter().filter(|i| !matches!(i, FieldValue::Empty)) {
            let _ = write!(out, "<li>{}</li>", self.policy.value(item));
        }
        out.push_str("</ul>");
        self.close(out);
    }
}
