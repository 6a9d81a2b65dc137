/// Synchronous HTTP implementation of [`Backend`] using `ureq`.
///
/// One agent per process, shared across calls. Each call is logged to the
/// request log with its outcome and latency. Validation failures come back
/// from the backend as `400` with a JSON envelope, so non-2xx replies are
/// decoded the same way as successful ones.
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    ADS_STATUS_PATH, AUDIENCE_INSIGHTS_PATH, AckResponse, Backend, CAMPAIGNS_PATH,
    CampaignResponse, CampaignsResponse, Envelope, GENERATE_REPORT_PATH, InsightsResponse,
    REPORTS_PATH, ReportResponse, ReportsResponse, StatusResponse, campaign_path,
    credentials_path, credentials_test_path,
};
use crate::analytics::logger::{RequestLogEntry, RequestLogger};
use crate::config::AssistantConfig;
use crate::error::RequestError;
use crate::insights::InsightsRequest;
use crate::model::{FormInput, Platform};

#[derive(Debug)]
pub struct HttpBackend {
    base_url: String,
    agent: ureq::Agent,
    logger: RequestLogger,
}

impl HttpBackend {
    /// Build a client from the resolved config.
    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::new(
            &config.backend.url,
            Duration::from_millis(config.backend.timeout_ms),
            RequestLogger::from_config(&config.logging),
        )
    }

    /// A zero `timeout` leaves requests unbounded.
    pub fn new(base_url: &str, timeout: Duration, logger: RequestLogger) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let agent = builder.build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
            logger,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        // "localhost" may resolve to ::1 first; the Flask dev server binds IPv4.
        format!("{}{}", self.base_url, path).replace("://localhost", "://127.0.0.1")
    }

    /// Send one request and decode its JSON envelope.
    fn exchange<T>(&self, method: &str, path: &str, body: Option<&Value>) -> Result<T, RequestError>
    where
        T: DeserializeOwned + Envelope,
    {
        let start = Instant::now();
        let request = self
            .agent
            .request(method, &self.url(path))
            .set("Accept", "application/json");

        let result = match body {
            Some(json) => request.send_json(json),
            None => request.call(),
        };

        let response = match result {
            Ok(resp) => resp,
            Err(ureq::Error::Status(_, resp)) => resp,
            Err(ureq::Error::Transport(transport)) => {
                let reason = transport.to_string();
                self.log(method, path, "transport", start, None, Some(&reason));
                return Err(RequestError::Transport {
                    path: path.to_string(),
                    reason,
                });
            }
        };

        let status = response.status();
        let text = match response.into_string() {
            Ok(text) => text,
            Err(e) => {
                let reason = e.to_string();
                self.log(method, path, "transport", start, Some(status), Some(&reason));
                return Err(RequestError::Transport {
                    path: path.to_string(),
                    reason,
                });
            }
        };

        match serde_json::from_str::<T>(&text) {
            Ok(envelope) => {
                let outcome = if envelope.succeeded() { "ok" } else { "rejected" };
                self.log(method, path, outcome, start, Some(status), envelope.error_text());
                Ok(envelope)
            }
            Err(e) => {
                let reason = e.to_string();
                self.log(method, path, "malformed", start, Some(status), Some(&reason));
                Err(RequestError::Malformed {
                    path: path.to_string(),
                    reason,
                })
            }
        }
    }

    fn log(
        &self,
        method: &str,
        path: &str,
        outcome: &str,
        start: Instant,
        status: Option<u16>,
        error: Option<&str>,
    ) {
        let mut entry =
            RequestLogEntry::new(method, path, outcome, start.elapsed().as_millis() as u64);
        entry.status = status;
        entry.error = error.map(str::to_string);
        self.logger.record(&entry);
    }
}

impl Backend for HttpBackend {
    fn generate_report(&self, form: &FormInput) -> Result<ReportResponse, RequestError> {
        self.exchange("POST", GENERATE_REPORT_PATH, Some(&form.to_payload()))
    }

    fn connection_status(&self) -> Result<StatusResponse, RequestError> {
        self.exchange("GET", ADS_STATUS_PATH, None)
    }

    fn save_credentials(
        &self,
        platform: Platform,
        form: &FormInput,
    ) -> Result<AckResponse, RequestError> {
        self.exchange("POST", &credentials_path(platform), Some(&form.to_string_map()))
    }

    fn test_credentials(&self, platform: Platform) -> Result<AckResponse, RequestError> {
        self.exchange("POST", &credentials_test_path(platform), None)
    }

    fn audience_insights(
        &self,
        request: &InsightsRequest,
    ) -> Result<InsightsResponse, RequestError> {
        let body = serde_json::to_value(request).map_err(|e| RequestError::Malformed {
            path: AUDIENCE_INSIGHTS_PATH.to_string(),
            reason: e.to_string(),
        })?;
        self.exchange("POST", AUDIENCE_INSIGHTS_PATH, Some(&body))
    }

    fn list_campaigns(&self) -> Result<CampaignsResponse, RequestError> {
        self.exchange("GET", CAMPAIGNS_PATH, None)
    }

    fn get_campaign(&self, id: i64) -> Result<CampaignResponse, RequestError> {
        self.exchange("GET", &campaign_path(id), None)
    }

    fn list_reports(&self) -> Result<ReportsResponse, RequestError> {
        self.exchange("GET", REPORTS_PATH, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_from_default_config() {
        let client = HttpBackend::from_config(&AssistantConfig::default());
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn client_strips_trailing_slash_and_localhost() {
        let client = HttpBackend::new(
            "http://localhost:5000/",
            Duration::from_secs(1),
            RequestLogger::disabled(),
        );
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/ads/status"), "http://127.0.0.1:5000/ads/status");
    }

    #[test]
    fn unreachable_backend_is_a_transport_error() {
        // Port 9 (discard) is closed on test hosts; the connect fails fast.
        let client = HttpBackend::new(
            "http://127.0.0.1:9",
            Duration::from_secs(2),
            RequestLogger::disabled(),
        );
        let err = client.connection_status().unwrap_err();
        assert!(err.is_transport());
    }
}
