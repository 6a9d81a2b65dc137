use std::fmt::Write as _;

use super::html::{HtmlPolicy, format_count, upper_label, whole_percent};
use crate::model::FieldValue;
use crate::model::insights::{
    AudienceOverview, BehavioralSegmentation, InsightsPayload, NoiseFiltering,
    PrecisionTargeting, RealDataIntegration, Segment,
};

/// Renders an [`InsightsPayload`] into the insights dashboard HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct InsightsRenderer {
    policy: HtmlPolicy,
}

impl InsightsRenderer {
    pub fn new(policy: HtmlPolicy) -> Self {
        Self { policy }
    }

    pub fn render(&self, insights: &InsightsPayload) -> String {
        let mut out = String::from("<div class=\"insights-dashboard\">\n");

        let audience = insights.audience_insights.as_ref();
        if let Some(overview) = audience.and_then(|a| a.audience_overview.as_ref()) {
            self.overview(&mut out, overview);
        }
        if let Some(segmentation) = audience.and_then(|a| a.behavioral_segmentation.as_ref()) {
            self.segmentation(&mut out, segmentation);
        }
        if let Some(noise) = &insights.noise_filtering {
            self.noise(&mut out, noise);
        }
        if let Some(targeting) = &insights.precision_targeting {
            self.targeting(&mut out, targeting);
        }
        if let Some(integration) = &insights.real_data_integration {
            self.integration(&mut out, integration);
        }

        out.push_str("</div>");
        out
    }

    fn open(&self, out: &mut String, title: &str, icon: &str) {
        let _ = write!(
            out,
            "<div class=\"insight-section\"><h3><i class=\"{icon} me-2\"></i>{title}</h3>"
        );
    }

    fn close(&self, out: &mut String) {
        out.push_str("</div>\n");
    }

    fn overview(&self, out: &mut String, overview: &AudienceOverview) {
        self.open(out, "Audience Overview", "fas fa-users");
        out.push_str("<div class=\"overview-grid\">");
        for (label, value) in [
            ("Primary Segments", overview.primary_segments.as_ref()),
            ("Key Characteristics", overview.key_characteristics.as_ref()),
            ("Market Size", overview.market_size_estimate.as_ref()),
        ] {
            let _ = write!(
                out,
                "<div class=\"overview-card\"><h5>{label}</h5><p>{}</p></div>",
                self.policy.value_or(value, "Not specified")
            );
        }
        out.push_str("</div>");
        self.close(out);
    }

    fn segmentation(&self, out: &mut String, segmentation: &BehavioralSegmentation) {
        self.open(out, "Behavioral Segmentation", "fas fa-sitemap");
        out.push_str("<div class=\"segmentation-grid\">");
        for segment in segmentation.segments() {
            self.segment(out, segment);
        }
        out.push_str("</div>");
        self.close(out);
    }

    fn segment(&self, out: &mut String, segment: &Segment) {
        let _ = write!(
            out,
            "<div class=\"segment-card\"><h5>{}</h5>\
             <p><strong>Size:</strong> {}</p><p><strong>Strategy:</strong> {}</p>",
            self.policy.value_or(segment.description.as_ref(), "Segment"),
            self.policy.value_or(segment.estimated_size.as_ref(), "Unknown"),
            self.policy.value_or(segment.targeting_strategy.as_ref(), "Not specified"),
        );
        if let Some(behaviors) = &segment.behaviors {
            out.push_str("<div class=\"behaviors\">");
            for tag in behaviors.iter().filter(|b| !matches!(b, FieldValue::Empty)) {
                let _ = write!(
                    out,
                    "<span class=\"behavior-tag\">{}</span>",
                    self.policy.value(tag)
                );
            }
            out.push_str("</div>");
        }
        out.push_str("</div>");
    }

    fn noise(&self, out: &mut String, noise: &NoiseFiltering) {
        let count = |n: Option<f64>| n.map(format_count).unwrap_or_else(|| "Unknown".to_string());

        self.open(out, "Audience Quality &amp; Noise Reduction", "fas fa-filter");
        let _ = write!(
            out,
            "<div class=\"noise-analysis\"><div class=\"quality-metrics\">\
             <div class=\"metric\"><span class=\"metric-label\">Original Audience Size</span>\
             <span class=\"metric-value\">{}</span></div>\
             <div class=\"metric\"><span class=\"metric-label\">Filtered Size</span>\
             <span class=\"metric-value\">{}</span></div>\
             <div class=\"metric\"><span class=\"metric-label\">Quality Score</span>\
             <span class=\"metric-value\">{}%</span></div></div>",
            count(noise.original_size),
            count(noise.filtered_size),
            whole_percent(noise.quality_score.unwrap_or(0.0)),
        );
        if let Some(removed) = &noise.removed_segments {
            out.push_str("<div class=\"removed-segments\"><h6>Filtered Out:</h6><ul>");
            for segment in removed.iter().filter(|s| !matches!(s, FieldValue::Empty)) {
                let _ = write!(out, "<li>{}</li>", self.policy.value(segment));
            }
            out.push_str("</ul></div>");
        }
        out.push_str("</div>");
        self.close(out);
    }

    fn targeting(&self, out: &mut String, targeting: &PrecisionTargeting) {
        self.open(out, "Precision Targeting Recommendations", "fas fa-bullseye");
        out.push_str("<div class=\"targeting-recommendations\">");

        if let Some(strategy) = &targeting.targeting_strategy {
            let _ = write!(
                out,
                "<div class=\"recommendation-card\"><h5>Targeting Strategy</h5>\
                 <p><strong>Primary Focus:</strong> {}</p><p><strong>Approach:</strong> {}</p></div>",
                self.policy.value_or(strategy.primary_focus.as_ref(), "Not specified"),
                self.policy.value_or(strategy.targeting_approach.as_ref(), "Not specified"),
            );
        }

        if let Some(allocation) = &targeting.budget_allocation {
            out.push_str(
                "<div class=\"recommendation-card\"><h5>Budget Allocation</h5>\
                 <div class=\"budget-breakdown\">",
            );
            for (segment, entry) in &allocation.entries {
                let Some(percentage) = &entry.percentage else {
                    continue;
                };
                let amount = entry.amount.map(format_count).unwrap_or_else(|| "0".to_string());
                let _ = write!(
                    out,
                    "<div class=\"budget-item\"><span>{}</span><span>{}% (${amount})</span></div>",
                    self.policy.text(&upper_label(segment)),
                    self.policy.value(percentage),
                );
            }
            out.push_str("</div></div>");
        }

        out.push_str("</div>");
        self.close(out);
    }

    fn integration(&self, out: &mut String, integration: &RealDataIntegration) {
        self.open(out, "Data Integration Status", "fas fa-database");
        let _ = write!(
            out,
            "<div class=\"integration-status\"><p><strong>Platforms Connected:</strong> {}</p>",
            self.policy.value_or(integration.platforms_connected.as_ref(), "0")
        );
        match &integration.connected_platforms {
            Some(platforms) => {
                let names = FieldValue::List(platforms.clone());
                let _ = write!(
                    out,
                    "<p><strong>Connected:</strong> {}</p>",
                    self.policy.value(&names)
                );
            }
            None => out.push_str(
                "<p><em>No platforms connected - Connect Google Ads or Meta Ads for enhanced insights</em></p>",
            ),
        }
        let _ = write!(
            out,
            "<p><strong>Real Data Used:</strong> {}</p></div>",
            if integration.real_data_used.is_some() { "Yes" } else { "No" }
        );
        self.close(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: serde_json::Value) -> String {
        let insights: InsightsPayload = serde_json::from_value(value).unwrap();
        InsightsRenderer::default().render(&insights)
    }

    #[test]
    fn empty_payload_renders_empty_dashboard() {
        let html = render(json!({}));
        assert_eq!(html, "<div class=\"insights-dashboard\">\n</div>");
    }

    #[test]
    fn overview_falls_back_to_not_specified() {
        let html = render(json!({
            "audience_insights": { "audience_overview": { "primary_segments": "Urban runners" } }
        }));
        assert!(html.contains("<h5>Primary Segments</h5><p>Urban runners</p>"));
        assert!(html.contains("<h5>Market Size</h5><p>Not specified</p>"));
    }

    #[test]
    fn segments_render_with_tags_and_fallbacks() {
        let html = render(json!({
            "audience_insights": { "behavioral_segmentation": {
                "growth_segment": { "behaviors": ["Weekend shoppers", "Deal seekers"] }
            } }
        }));
        assert!(html.contains("<h5>Segment</h5>"));
        assert!(html.contains("<strong>Size:</strong> Unknown"));
        assert!(html.contains("<span class=\"behavior-tag\">Deal seekers</span>"));
        assert_eq!(html.matches("segment-card").count(), 1);
    }

    #[test]
    fn noise_metrics_are_formatted() {
        let html = render(json!({
            "noise_filtering": {
                "original_size": 10000,
                "filtered_size": 5500,
                "quality_score": 0.75,
                "removed_segments": ["Bot traffic: 1,500 users"]
            }
        }));
        assert!(html.contains("<span class=\"metric-value\">10,000</span>"));
        assert!(html.contains("<span class=\"metric-value\">5,500</span>"));
        assert!(html.contains("<span class=\"metric-value\">75%</span>"));
        assert!(html.contains("<li>Bot traffic: 1,500 users</li>"));
    }

    #[test]
    fn unknown_sizes_and_missing_score() {
        let html = render(json!({ "noise_filtering": { "filtered_size": null, "removed_segments": [] } }));
        assert_eq!(html.matches(">Unknown<").count(), 2);
        assert!(html.contains(">0%<"));
        assert!(!html.contains("Filtered Out"));
    }

    #[test]
    fn budget_allocation_skips_entries_without_percentage() {
        let html = render(json!({
            "precision_targeting": { "budget_allocation": {
                "high_value_segment": { "percentage": 60, "amount": 3000.0 },
                "growth_segment": { "percentage": 30 },
                "notes": { "rationale": "monthly review" }
            } }
        }));
        assert!(html.contains("<span>HIGH VALUE SEGMENT</span><span>60% ($3,000)</span>"));
        assert!(html.contains("<span>GROWTH SEGMENT</span><span>30% ($0)</span>"));
        assert!(!html.contains("NOTES"));
    }

    #[test]
    fn integration_status_without_platforms() {
        let html = render(json!({ "real_data_integration": { "platforms_connected": 0, "real_data_used": false } }));
        assert!(html.contains("<strong>Platforms Connected:</strong> 0"));
        assert!(html.contains("No platforms connected"));
        assert!(html.contains("<strong>Real Data Used:</strong> No"));
    }

    #[test]
    fn integration_status_with_platforms() {
        let html = render(json!({ "real_data_integration": {
            "platforms_connected": 2,
            "connected_platforms": ["google_ads", "meta_ads"],
            "real_data_used": true
        } }));
        assert!(html.contains("<strong>Connected:</strong> google_ads, meta_ads"));
        assert!(html.contains("<strong>Real Data Used:</strong> Yes"));
    }
}
