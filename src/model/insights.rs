//! Deep audience insights payload returned by `POST /audience-insights`.
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::presence::{FieldValue, numeric, present};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InsightsPayload {
    #[serde(default, deserialize_with = "present")]
    pub audience_insights: Option<AudienceInsights>,
    #[serde(default, deserialize_with = "present")]
    pub noise_filtering: Option<NoiseFiltering>,
    #[serde(default, deserialize_with = "present")]
    pub precision_targeting: Option<PrecisionTargeting>,
    #[serde(default, deserialize_with = "present")]
    pub real_data_integration: Option<RealDataIntegration>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AudienceInsights {
    #[serde(default, deserialize_with = "present")]
    pub audience_overview: Option<AudienceOverview>,
    #[serde(default, deserialize_with = "present")]
    pub behavioral_segmentation: Option<BehavioralSegmentation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AudienceOverview {
    #[serde(default, deserialize_with = "present")]
    pub primary_segments: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub key_characteristics: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub market_size_estimate: Option<FieldValue>,
}

/// The three fixed behavioural segments. Other keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BehavioralSegmentation {
    #[serde(default, deserialize_with = "present")]
    pub high_value_segment: Option<Segment>,
    #[serde(default, deserialize_with = "present")]
    pub growth_segment: Option<Segment>,
    #[serde(default, deserialize_with = "present")]
    pub nurturing_segment: Option<Segment>,
}

impl BehavioralSegmentation {
    /// Present segments in display order: high value, growth, nurturing.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        [
            self.high_value_segment.as_ref(),
            self.growth_segment.as_ref(),
            self.nurturing_segment.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Segment {
    #[serde(default, deserialize_with = "present")]
    pub description: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub behaviors: Option<Vec<FieldValue>>,
    #[serde(default, deserialize_with = "present")]
    pub targeting_strategy: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub estimated_size: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NoiseFiltering {
    #[serde(default, deserialize_with = "numeric")]
    pub original_size: Option<f64>,
    #[serde(default, deserialize_with = "numeric")]
    pub filtered_size: Option<f64>,
    /// Fraction in `0.0..=1.0`.
    #[serde(default, deserialize_with = "numeric")]
    pub quality_score: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub removed_segments: Option<Vec<FieldValue>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PrecisionTargeting {
    #[serde(default, deserialize_with = "present")]
    pub targeting_strategy: Option<TargetingStrategy>,
    #[serde(default, deserialize_with = "present")]
    pub budget_allocation: Option<BudgetAllocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TargetingStrategy {
    #[serde(default, deserialize_with = "present")]
    pub primary_focus: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub targeting_approach: Option<FieldValue>,
}

/// Segment → allocation mapping, in the order the backend sent it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetAllocation {
    pub entries: Vec<(String, Allocation)>,
}

impl<'de> Deserialize<'de> for BudgetAllocation {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        let entries = map
            .into_iter()
            .map(|(segment, value)| (segment, serde_json::from_value(value).unwrap_or_default()))
            .collect();
        Ok(Self { entries })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Allocation {
    #[serde(default, deserialize_with = "present")]
    pub percentage: Option<FieldValue>,
    #[serde(default, deserialize_with = "numeric")]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub rationale: Option<FieldValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RealDataIntegration {
    #[serde(default, deserialize_with = "present")]
    pub platforms_connected: Option<FieldValue>,
    #[serde(default, deserialize_with = "present")]
    pub connected_platforms: Option<Vec<FieldValue>>,
    #[serde(default, deserialize_with = "present")]
    pub real_data_used: Option<FieldValue>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn budget_allocation_keeps_backend_order() {
        let targeting: PrecisionTargeting = serde_json::from_value(json!({
            "budget_allocation": {
                "testing_budget": { "percentage": 10, "amount": 500.0 },
                "high_value_segment": { "percentage": 60, "amount": 3000.0 },
                "notes": "rebalance monthly"
            }
        }))
        .unwrap();

        let allocation = targeting.budget_allocation.unwrap();
        let keys: Vec<&str> = allocation.entries.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["testing_budget", "high_value_segment", "notes"]);
        assert!(allocation.entries[2].1.percentage.is_none());
    }

    #[test]
    fn segments_iterate_in_fixed_order() {
        let seg: BehavioralSegmentation = serde_json::from_value(json!({
            "nurturing_segment": { "description": "Nurture" },
            "high_value_segment": { "description": "High" },
            "lurkers": { "description": "ignored" }
        }))
        .unwrap();

        let names: Vec<String> = seg
            .segments()
            .map(|s| s.description.as_ref().unwrap().display())
            .collect();
        assert_eq!(names, ["High", "Nurture"]);
    }

    #[test]
    fn zero_original_size_is_kept() {
        let noise: NoiseFiltering =
            serde_json::from_value(json!({ "original_size": 0, "quality_score": null })).unwrap();
        assert_eq!(noise.original_size, Some(0.0));
        assert!(noise.quality_score.is_none());
    }

    #[test]
    fn numeric_strings_are_read_as_numbers() {
        let noise: NoiseFiltering = serde_json::from_value(json!({
            "original_size": "10000",
            "filtered_size": " 8500 ",
            "quality_score": "0.85"
        }))
        .unwrap();
        assert_eq!(noise.original_size, Some(10_000.0));
        assert_eq!(noise.filtered_size, Some(8_500.0));
        assert_eq!(noise.quality_score, Some(0.85));

        let noise: NoiseFiltering =
            serde_json::from_value(json!({ "original_size": "about ten thousand" })).unwrap();
        assert!(noise.original_size.is_none());
    }
}
