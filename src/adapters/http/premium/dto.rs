//! HTTP DTOs for premium endpoints.

use serde::Serialize;

use crate::domain::premium::{FeatureEntry, PrayerFeature, PremiumPrinciple, SubscriptionLevel};

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One catalogued feature as shown to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureSummary {
    pub feature: PrayerFeature,
    pub name: String,
    pub description: String,
    pub required_level: SubscriptionLevel,
    /// Core spiritual features are never withheld outright.
    pub core: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basic_version: Option<PrayerFeature>,
}

impl From<&FeatureEntry> for FeatureSummary {
    fn from(entry: &FeatureEntry) -> Self {
        Self {
            feature: entry.feature.clone(),
            name: entry.name.clone(),
            description: entry.description.clone(),
            required_level: entry.required_level,
            core: entry.core,
            basic_version: entry.basic_counterpart.clone(),
        }
    }
}

/// Features available at a level.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureListResponse {
    pub level: SubscriptionLevel,
    pub features: Vec<FeatureSummary>,
}

/// The premium principles.
#[derive(Debug, Clone, Serialize)]
pub struct PrinciplesResponse {
    pub principles: &'static [PremiumPrinciple],
}

/// What a gated route actually served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GatedFeatureResponse {
    pub level: SubscriptionLevel,
    pub requested_feature: PrayerFeature,
    pub provided_feature: PrayerFeature,
    pub using_basic_version: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
