//! Saved campaign records (`GET /campaigns`, `GET /campaigns/<id>`) and the
//! reports stored with them (`GET /reports`).
use serde::Deserialize;

use super::presence::{FieldValue, lenient, lenient_or_default, present};
use super::report::ReportPayload;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CampaignSummary {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub campaign_name: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub target_audience: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub objectives: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub channels: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub current_metrics: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub created_at: Option<FieldValue>,
}

/// One generated report as the backend stored it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SavedReport {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub campaign_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub report_data: Option<ReportPayload>,
    #[serde(default, deserialize_with = "present")]
    pub generated_at: Option<FieldValue>,
}

/// A campaign together with every report generated for it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignDetail {
    #[serde(flatten)]
    pub campaign: CampaignSummary,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub reports: Vec<SavedReport>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detail_carries_campaign_fields_and_reports() {
        let detail: CampaignDetail = serde_json::from_value(json!({
            "id": 3,
            "campaign_name": "Spring Launch",
            "budget": 5000.0,
            "reports": [
                { "id": 9, "campaign_id": 3, "report_data": { "executive_summary": "Go" },
                  "generated_at": "2026-03-01T10:00:00" }
            ]
        }))
        .unwrap();
        assert_eq!(detail.campaign.id, Some(3));
        assert_eq!(detail.campaign.budget, Some(5000.0));
        assert_eq!(detail.reports.len(), 1);
        let report = detail.reports[0].report_data.as_ref().unwrap();
        assert!(report.executive_summary.is_some());
    }

    #[test]
    fn missing_reports_is_empty() {
        let detail: CampaignDetail = serde_json::from_value(json!({ "id": 1 })).unwrap();
        assert!(detail.reports.is_empty());
    }

    #[test]
    fn unusable_report_data_decodes_to_none() {
        let saved: SavedReport =
            serde_json::from_value(json!({ "id": 2, "report_data": "not a report" })).unwrap();
        assert_eq!(saved.id, Some(2));
        assert!(saved.report_data.is_none());
    }
}
