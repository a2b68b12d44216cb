//! HTTP handlers for premium endpoints.

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::middleware::{
    CurrentSubscription, FeatureGate, OptionalFallback, SubscriptionContext, UpgradeSettings,
};
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::premium::{premium_principles, AccessPolicy, PrayerFeature, SubscriptionLevel};

use super::dto::{
    ErrorResponse, FeatureListResponse, FeatureSummary, GatedFeatureResponse, HealthResponse,
    PrinciplesResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for premium routes.
#[derive(Debug, Clone)]
pub struct PremiumAppState {
    pub policy: AccessPolicy,
    pub upgrade: UpgradeSettings,
}

impl PremiumAppState {
    pub fn new(policy: AccessPolicy, upgrade: UpgradeSettings) -> Self {
        Self { policy, upgrade }
    }

    /// Gate state for a route serving `feature`.
    pub fn gate(&self, feature: PrayerFeature) -> FeatureGate {
        FeatureGate::new(self.policy.clone(), feature, self.upgrade.clone())
    }

    fn features_for(&self, level: SubscriptionLevel) -> FeatureListResponse {
        let catalog = self.policy.catalog();
        let mut features: Vec<FeatureSummary> = self
            .policy
            .features_at_or_below(level)
            .iter()
            .filter_map(|feature| catalog.get(feature))
            .map(FeatureSummary::from)
            .collect();
        // Stable sort keeps feature-id order within a level.
        features.sort_by_key(|summary| summary.required_level);

        FeatureListResponse { level, features }
    }
}

impl Default for PremiumAppState {
    fn default() -> Self {
        Self::new(AccessPolicy::standard(), UpgradeSettings::default())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/premium/features - Features available to the caller
pub async fn list_my_features(
    State(state): State<PremiumAppState>,
    CurrentSubscription(ctx): CurrentSubscription,
) -> impl IntoResponse {
    Json(state.features_for(ctx.level))
}

/// GET /api/premium/features/:feature - Access check for one feature
pub async fn check_feature(
    State(state): State<PremiumAppState>,
    CurrentSubscription(ctx): CurrentSubscription,
    Path(feature): Path<String>,
) -> Result<impl IntoResponse, PremiumApiError> {
    let feature = PrayerFeature::new(feature)?;
    Ok(Json(state.policy.check(ctx.level, &feature)))
}

/// GET /api/premium/levels/:level/features - Features included in a level
pub async fn list_level_features(
    State(state): State<PremiumAppState>,
    Path(level): Path<String>,
) -> Result<impl IntoResponse, PremiumApiError> {
    let level: SubscriptionLevel = level.parse()?;
    Ok(Json(state.features_for(level)))
}

/// GET /api/premium/principles - The premium principles
pub async fn list_principles() -> impl IntoResponse {
    Json(PrinciplesResponse {
        principles: premium_principles(),
    })
}

/// GET /api/health
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::ok())
}

// ════════════════════════════════════════════════════════════════════════════════
// Gated Feature Handlers
// ════════════════════════════════════════════════════════════════════════════════

fn served(
    requested: PrayerFeature,
    ctx: &SubscriptionContext,
    fallback: &OptionalFallback,
) -> GatedFeatureResponse {
    GatedFeatureResponse {
        level: ctx.level,
        provided_feature: fallback.served(&requested),
        requested_feature: requested,
        using_basic_version: fallback.using_basic_version(),
    }
}

/// GET /api/prayer/rosary - Gated on the enhanced rosary
pub async fn rosary(
    CurrentSubscription(ctx): CurrentSubscription,
    fallback: OptionalFallback,
) -> impl IntoResponse {
    Json(served(PrayerFeature::ENHANCED_ROSARY, &ctx, &fallback))
}

/// GET /api/garden - Gated on the advanced garden
pub async fn garden(
    CurrentSubscription(ctx): CurrentSubscription,
    fallback: OptionalFallback,
) -> impl IntoResponse {
    Json(served(PrayerFeature::ADVANCED_GARDEN, &ctx, &fallback))
}

/// GET /api/garden/shared - Gated on the shared family garden
pub async fn shared_garden(
    CurrentSubscription(ctx): CurrentSubscription,
    fallback: OptionalFallback,
) -> impl IntoResponse {
    Json(served(PrayerFeature::SHARED_GARDEN, &ctx, &fallback))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for premium endpoints.
#[derive(Debug)]
pub struct PremiumApiError(ValidationError);

impl From<ValidationError> for PremiumApiError {
    fn from(err: ValidationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PremiumApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), self.0.to_string());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
