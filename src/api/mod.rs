//! Backend contract: endpoints, response envelopes and the [`Backend`] trait.
//!
//! Every endpoint answers with a JSON envelope carrying a `success` flag and,
//! on failure, an optional `error` string. A decoded envelope with
//! `success: false` is a normal return value; only transport failures and
//! undecodable bodies surface as [`RequestError`].

mod http;

use serde::Deserialize;

use crate::error::RequestError;
use crate::insights::InsightsRequest;
use crate::model::presence::{lenient, lenient_or_default, present};
use crate::model::{
    CampaignDetail, CampaignSummary, ConnectionStatus, FormInput, InsightsPayload, Platform,
    ReportPayload, SavedReport,
};

pub use http::HttpBackend;

pub const GENERATE_REPORT_PATH: &str = "/generate-report";
pub const ADS_STATUS_PATH: &str = "/ads/status";
pub const AUDIENCE_INSIGHTS_PATH: &str = "/audience-insights";
pub const CAMPAIGNS_PATH: &str = "/campaigns";
pub const REPORTS_PATH: &str = "/reports";

/// `GET /campaigns/<id>`.
pub fn campaign_path(id: i64) -> String {
    format!("{CAMPAIGNS_PATH}/{id}")
}

/// `POST /credentials/<slug>`.
pub fn credentials_path(platform: Platform) -> String {
    format!("/credentials/{}", platform.slug())
}

/// `POST /credentials/<slug>/test`.
pub fn credentials_test_path(platform: Platform) -> String {
    format!("/credentials/{}/test", platform.slug())
}

// ---------------------------------------------------------------------------
// Backend trait
// ---------------------------------------------------------------------------

/// The HTTP/JSON collaborator the controller talks to.
///
/// [`HttpBackend`] is the real implementation; tests substitute an in-memory
/// one.
pub trait Backend {
    fn generate_report(&self, form: &FormInput) -> Result<ReportResponse, RequestError>;

    fn connection_status(&self) -> Result<StatusResponse, RequestError>;

    fn save_credentials(
        &self,
        platform: Platform,
        form: &FormInput,
    ) -> Result<AckResponse, RequestError>;

    fn test_credentials(&self, platform: Platform) -> Result<AckResponse, RequestError>;

    fn audience_insights(
        &self,
        request: &InsightsRequest,
    ) -> Result<InsightsResponse, RequestError>;

    fn list_campaigns(&self) -> Result<CampaignsResponse, RequestError>;

    /// One campaign with its saved reports.
    fn get_campaign(&self, id: i64) -> Result<CampaignResponse, RequestError>;

    /// Every saved report, newest first.
    fn list_reports(&self) -> Result<ReportsResponse, RequestError>;
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Common view over the response envelopes, used for request logging.
pub trait Envelope {
    fn succeeded(&self) -> bool;
    fn error_text(&self) -> Option<&str>;
}

macro_rules! envelope {
    ($ty:ty) => {
        impl Envelope for $ty {
            fn succeeded(&self) -> bool {
                self.success
            }

            fn error_text(&self) -> Option<&str> {
                self.error.as_deref()
            }
        }
    };
}

/// Response of `POST /generate-report`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportResponse {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub report: Option<ReportPayload>,
    #[serde(default, deserialize_with = "present")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub campaign_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub report_id: Option<i64>,
}

/// Response of `GET /ads/status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<ConnectionStatus>,
    #[serde(default, deserialize_with = "present")]
    pub error: Option<String>,
}

/// Bare acknowledgement used by the credential endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AckResponse {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "present")]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub message: Option<String>,
}

/// Response of `POST /audience-insights`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightsResponse {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub insights: Option<InsightsPayload>,
    #[serde(default, deserialize_with = "present")]
    pub error: Option<String>,
}

/// Response of `GET /campaigns`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignsResponse {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub campaigns: Vec<CampaignSummary>,
    #[serde(default, deserialize_with = "present")]
    pub error: Option<String>,
}

/// Response of `GET /campaigns/<id>`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignResponse {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub campaign: Option<CampaignDetail>,
    #[serde(default, deserialize_with = "present")]
    pub error: Option<String>,
}

/// Response of `GET /reports`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportsResponse {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub reports: Vec<SavedReport>,
    #[serde(default, deserialize_with = "present")]
    pub error: Option<String>,
}

envelope!(ReportResponse);
envelope!(StatusResponse);
envelope!(AckResponse);
envelope!(InsightsResponse);
envelope!(CampaignsResponse);
envelope!(CampaignResponse);
envelope!(ReportsResponse);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_paths_use_slugs() {
        assert_eq!(credentials_path(Platform::GoogleAds), "/credentials/google-ads");
        assert_eq!(
            credentials_test_path(Platform::MetaAds),
            "/credentials/meta-ads/test"
        );
    }

    #[test]
    fn campaign_path_embeds_id() {
        assert_eq!(campaign_path(12), "/campaigns/12");
    }

    #[test]
    fn rejected_envelope_keeps_error() {
        let resp: ReportResponse =
            serde_json::from_str(r#"{"success": false, "error": "Budget must be a positive number"}"#)
                .unwrap();
        assert!(!resp.succeeded());
        assert_eq!(resp.error_text(), Some("Budget must be a positive number"));
        assert!(resp.report.is_none());
    }

    #[test]
    fn empty_error_string_counts_as_missing() {
        let resp: AckResponse = serde_json::from_str(r#"{"success": false, "error": ""}"#).unwrap();
        assert!(resp.error.is_none());
    }

    #[test]
    fn empty_report_object_is_still_a_report() {
        let resp: ReportResponse =
            serde_json::from_str(r#"{"success": true, "report": {}, "campaign_id": 7}"#).unwrap();
        assert!(resp.report.is_some());
        assert_eq!(resp.campaign_id, Some(7));
    }

    #[test]
    fn missing_success_flag_means_failure() {
        let resp: StatusResponse = serde_json::from_str("{}").unwrap();
        assert!(!resp.succeeded());
    }
}
