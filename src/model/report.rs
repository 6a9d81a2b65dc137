//! Campaign report payload returned by `POST /generate-report`.
use serde::Deserialize;

use super::presence::{FieldValue, present};

/// The full report document. Every section is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportPayload {
    #[serde(default, deserialize_with = "present")]
    pub campaign_metadata: Option<CampaignMetadata>,
    #[serde(default, deserialize_with = "present")]
    pub executive_summary: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub budget_analysis: Option<BudgetAnalysis>,
    #[serde(default, deserialize_with = "present")]
    pub audience_insights: Option<AudienceProfile>,
    /// Must be a JSON array; anything else is treated as absent.
    #[serde(default, deserialize_with = "present")]
    pub strategy_recommendations: Option<Vec<FieldValue>>,
    #[serde(default, deserialize_with = "present")]
    pub channel_optimization: Option<ChannelOptimization>,
    #[serde(default, deserialize_with = "present")]
    pub kpi_framework: Option<KpiFramework>,
    #[serde(default, deserialize_with = "present")]
    pub risk_assessment: Option<RiskAssessment>,
    /// Must be a JSON array; anything else is treated as absent.
    #[serde(default, deserialize_with = "present")]
    pub next_steps: Option<Vec<FieldValue>>,
}

/// Header block describing the campaign the report was generated for.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CampaignMetadata {
    #[serde(default, deserialize_with = "present")]
    pub campaign_name: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub budget: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub duration: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub generated_at: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub daily_budget_estimate: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BudgetAnalysis {
    #[serde(default, deserialize_with = "present")]
    pub daily_budget: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub channel_distribution: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub roi_projection: Option<FieldValue>,
}

/// Audience section of the report (distinct from the deep insights payload).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AudienceProfile {
    #[serde(default, deserialize_with = "present")]
    pub demographics: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub behaviors: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub pain_points: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChannelOptimization {
    #[serde(default, deserialize_with = "present")]
    pub primary_channels: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub content_strategy: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub timing_recommendations: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct KpiFramework {
    #[serde(default, deserialize_with = "present")]
    pub primary_metrics: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub success_benchmarks: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub monitoring_frequency: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RiskAssessment {
    #[serde(default, deserialize_with = "present")]
    pub potential_challenges: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub mitigation_strategies: Option<FieldValue>,
}
