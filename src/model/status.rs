//! Advertising platform identities and the `GET /ads/status` record.
use std::fmt;

use serde::Deserialize;

use super::presence::{FieldValue, lenient, lenient_or_default, present};

/// An external advertising platform with a connect/credential/test lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    GoogleAds,
    MetaAds,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::GoogleAds, Platform::MetaAds];

    /// Identifier used in status payloads (`google_ads`).
    pub fn id(self) -> &'static str {
        match self {
            Self::GoogleAds => "google_ads",
            Self::MetaAds => "meta_ads",
        }
    }

    /// URL segment used by the credential endpoints (`google-ads`).
    pub fn slug(self) -> &'static str {
        match self {
            Self::GoogleAds => "google-ads",
            Self::MetaAds => "meta-ads",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::GoogleAds => "Google Ads",
            Self::MetaAds => "Meta Ads",
        }
    }

    /// Form fields the backend expects when saving credentials.
    pub fn credential_fields(self) -> &'static [&'static str] {
        match self {
            Self::GoogleAds => &[
                "developer_token",
                "client_id",
                "client_secret",
                "refresh_token",
                "customer_id",
            ],
            Self::MetaAds => &["access_token", "app_id", "app_secret", "ad_account_id"],
        }
    }

    /// Parse either the id (`google_ads`) or the slug (`google-ads`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google_ads" | "google-ads" | "google" => Some(Self::GoogleAds),
            "meta_ads" | "meta-ads" | "meta" => Some(Self::MetaAds),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Connection state of a single platform.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlatformStatus {
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub connected: bool,
    #[serde(default, deserialize_with = "present")]
    pub account_id: Option<FieldValue>,
}

/// Aggregate connection status across all platforms.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConnectionStatus {
    #[serde(default, deserialize_with = "lenient")]
    pub google_ads: Option<PlatformStatus>,
    #[serde(default, deserialize_with = "lenient")]
    pub meta_ads: Option<PlatformStatus>,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub total_connected: u32,
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub connected_platforms: Vec<String>,
}

impl ConnectionStatus {
    pub fn platform(&self, platform: Platform) -> Option<&PlatformStatus> {
        match platform {
            Platform::GoogleAds => self.google_ads.as_ref(),
            Platform::MetaAds => self.meta_ads.as_ref(),
        }
    }

    /// Whether the platform reports itself connected. Missing entries count as
    /// disconnected.
    pub fn is_connected(&self, platform: Platform) -> bool {
        self.platform(platform).is_some_and(|p| p.connected)
    }
}
