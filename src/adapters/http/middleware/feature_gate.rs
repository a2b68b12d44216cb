//! Feature gate middleware for axum.
//!
//! Wraps a route that serves one `PrayerFeature`. Using the level left by
//! `subscription_middleware` (Basic if absent), the gate either:
//!
//! - lets the request through unchanged,
//! - lets it through with a `FeatureFallback` in extensions, telling the
//!   handler to serve the basic counterpart of a core feature, or
//! - answers itself with a 200 upgrade offer for a non-core feature.
//!
//! The gate never responds with an error status.
//!
//! # Example
//!
//! ```ignore
//! let gate = FeatureGate::new(policy, PrayerFeature::ENHANCED_ROSARY, UpgradeSettings::default());
//!
//! let app = Router::new().route(
//!     "/prayer/rosary",
//!     get(rosary).layer(middleware::from_fn_with_state(gate, feature_gate_middleware)),
//! );
//! ```

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use super::subscription::SubscriptionContext;
use crate::config::PremiumConfig;
use crate::domain::premium::{AccessPolicy, FeatureDecision, PrayerFeature, SubscriptionLevel};

/// Message carried by every upgrade offer.
pub const UPGRADE_REQUIRED_MESSAGE: &str = "Feature requires premium subscription";

/// How upgrade offers are presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeSettings {
    pub url: String,
    pub message: String,
    /// Add feature details and upgrade info to the offer body.
    pub detailed: bool,
}

impl Default for UpgradeSettings {
    fn default() -> Self {
        Self::from(&PremiumConfig::default())
    }
}

impl From<&PremiumConfig> for UpgradeSettings {
    fn from(config: &PremiumConfig) -> Self {
        Self {
            url: config.upgrade_url.clone(),
            message: config.upgrade_message.clone(),
            detailed: config.detailed_upgrade_info,
        }
    }
}

/// Gate state: the policy, the feature the wrapped route serves, and how to
/// present upgrade offers.
#[derive(Debug, Clone)]
pub struct FeatureGate {
    policy: AccessPolicy,
    feature: PrayerFeature,
    upgrade: UpgradeSettings,
}

impl FeatureGate {
    pub fn new(policy: AccessPolicy, feature: PrayerFeature, upgrade: UpgradeSettings) -> Self {
        Self {
            policy,
            feature,
            upgrade,
        }
    }

    pub fn feature(&self) -> &PrayerFeature {
        &self.feature
    }

    /// Build the upgrade offer for a denied non-core feature.
    pub fn upgrade_offer(
        &self,
        feature: &PrayerFeature,
        required_level: SubscriptionLevel,
    ) -> UpgradeOffer {
        if !self.upgrade.detailed {
            return UpgradeOffer::minimal();
        }

        let (feature_name, feature_description) = match self.policy.entry(feature) {
            Some(entry) => (entry.name.clone(), entry.description.clone()),
            None => (feature.to_string(), String::new()),
        };

        UpgradeOffer {
            message: UPGRADE_REQUIRED_MESSAGE,
            details: Some(UpgradeDetails {
                feature: feature.clone(),
                feature_name,
                feature_description,
                required_level,
                upgrade_info: UpgradeInfo {
                    url: self.upgrade.url.clone(),
                    message: self.upgrade.message.clone(),
                },
            }),
        }
    }
}

/// Marker left in extensions when a core feature is served in its basic form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureFallback {
    pub requested: PrayerFeature,
    pub provided: PrayerFeature,
}

impl FeatureFallback {
    /// A fallback is only ever recorded when the basic version is in use.
    pub fn using_basic_version(&self) -> bool {
        true
    }
}

/// Upgrade offer body, returned with 200 OK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeOffer {
    pub message: &'static str,
    #[serde(flatten)]
    pub details: Option<UpgradeDetails>,
}

impl UpgradeOffer {
    pub fn minimal() -> Self {
        Self {
            message: UPGRADE_REQUIRED_MESSAGE,
            details: None,
        }
    }
}

impl IntoResponse for UpgradeOffer {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeDetails {
    pub feature: PrayerFeature,
    pub feature_name: String,
    pub feature_description: String,
    pub required_level: SubscriptionLevel,
    pub upgrade_info: UpgradeInfo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeInfo {
    pub url: String,
    pub message: String,
}

/// Applies the gate's access decision to the request.
pub async fn feature_gate_middleware(
    State(gate): State<FeatureGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let level = request
        .extensions()
        .get::<SubscriptionContext>()
        .map(|ctx| ctx.level)
        .unwrap_or_default();

    match gate.policy.evaluate(level, &gate.feature) {
        FeatureDecision::Granted => {
            tracing::debug!(feature = %gate.feature, level = %level, "Feature granted");
            next.run(request).await
        }
        FeatureDecision::Substituted {
            requested,
            provided,
        } => {
            tracing::info!(
                requested = %requested,
                provided = %provided,
                level = %level,
                "Serving basic version of core feature"
            );
            request
                .extensions_mut()
                .insert(FeatureFallback { requested, provided });
            next.run(request).await
        }
        FeatureDecision::UpgradeOffered {
            feature,
            required_level,
        } => {
            tracing::info!(
                feature = %feature,
                level = %level,
                required_level = %required_level,
                "Offering upgrade"
            );
            gate.upgrade_offer(&feature, required_level).into_response()
        }
    }
}

/// Extractor for the gate's fallback marker, `None` when the requested
/// feature is served as-is.
#[derive(Debug, Clone)]
pub struct OptionalFallback(pub Option<FeatureFallback>);

impl OptionalFallback {
    /// The feature actually served for a route gated on `requested`.
    pub fn served(&self, requested: &PrayerFeature) -> PrayerFeature {
        self.0
            .as_ref()
            .map(|fallback| fallback.provided.clone())
            .unwrap_or_else(|| requested.clone())
    }

    pub fn using_basic_version(&self) -> bool {
        self.0
            .as_ref()
            .map(FeatureFallback::using_basic_version)
            .unwrap_or(false)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalFallback
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalFallback(parts.extensions.get::<FeatureFallback>().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    async fn echo_fallback(fallback: OptionalFallback) -> String {
        match fallback.0 {
            Some(f) => format!("fallback:{}->{}", f.requested, f.provided),
            None => "unchanged".to_string(),
        }
    }

    fn gated_app(
        feature: PrayerFeature,
        level: Option<SubscriptionLevel>,
        detailed: bool,
    ) -> Router {
        let upgrade = UpgradeSettings {
            detailed,
            ..UpgradeSettings::default()
        };
        let gate = FeatureGate::new(AccessPolicy::standard(), feature, upgrade);

        let router = Router::new().route(
            "/gated",
            get(echo_fallback).layer(middleware::from_fn_with_state(gate, feature_gate_middleware)),
        );

        match level {
            Some(level) => router.layer(axum::Extension(SubscriptionContext {
                level,
                user_id: None,
            })),
            None => router,
        }
    }

    async fn call(app: Router) -> (StatusCode, String) {
        let response = app
            .oneshot(
                axum::http::Request::builder()
                    .uri("/gated")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Gate Decision Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn granted_feature_runs_handler_unchanged() {
        let app = gated_app(
            PrayerFeature::SHARED_GARDEN,
            Some(SubscriptionLevel::Family),
            false,
        );

        let (status, body) = call(app).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "unchanged");
    }

    #[tokio::test]
    async fn core_feature_is_substituted_for_basic_caller() {
        let app = gated_app(
            PrayerFeature::ENHANCED_ROSARY,
            Some(SubscriptionLevel::Basic),
            false,
        );

        let (status, body) = call(app).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "fallback:enhanced_rosary->core_rosary");
    }

    #[tokio::test]
    async fn non_core_feature_gets_minimal_upgrade_offer() {
        let app = gated_app(
            PrayerFeature::SHARED_GARDEN,
            Some(SubscriptionLevel::Basic),
            false,
        );

        let (status, body) = call(app).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"message":"Feature requires premium subscription"}"#);
    }

    #[tokio::test]
    async fn missing_context_is_treated_as_basic() {
        let app = gated_app(PrayerFeature::ADVANCED_GARDEN, None, false);

        let (_, body) = call(app).await;

        assert_eq!(body, "fallback:advanced_garden->basic_garden");
    }

    #[tokio::test]
    async fn detailed_upgrade_offer_carries_feature_info() {
        let app = gated_app(
            PrayerFeature::SHARED_GARDEN,
            Some(SubscriptionLevel::Premium),
            true,
        );

        let (status, body) = call(app).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], UPGRADE_REQUIRED_MESSAGE);
        assert_eq!(json["feature"], "shared_garden");
        assert_eq!(json["required_level"], "family");
        assert_eq!(json["upgrade_info"]["url"], "/premium/learn-more");
        assert_eq!(json["upgrade_info"]["message"], "Enhance your prayer journey");
        assert!(json["feature_name"].as_str().is_some());
    }

    #[tokio::test]
    async fn unknown_feature_offers_upgrade_to_highest_level() {
        let app = gated_app(
            PrayerFeature::new("candle_lighting").unwrap(),
            Some(SubscriptionLevel::Premium),
            true,
        );

        let (_, body) = call(app).await;
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();

        assert_eq!(json["required_level"], "family");
        assert_eq!(json["feature_name"], "candle_lighting");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // OptionalFallback Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn served_feature_defaults_to_requested() {
        let fallback = OptionalFallback(None);

        assert_eq!(
            fallback.served(&PrayerFeature::ENHANCED_ROSARY),
            PrayerFeature::ENHANCED_ROSARY
        );
        assert!(!fallback.using_basic_version());
    }

    #[test]
    fn served_feature_is_provided_on_fallback() {
        let fallback = OptionalFallback(Some(FeatureFallback {
            requested: PrayerFeature::ENHANCED_ROSARY,
            provided: PrayerFeature::CORE_ROSARY,
        }));

        assert_eq!(
            fallback.served(&PrayerFeature::ENHANCED_ROSARY),
            PrayerFeature::CORE_ROSARY
        );
        assert!(fallback.using_basic_version());
    }

    #[test]
    fn minimal_offer_serializes_to_bare_message() {
        let json = serde_json::to_string(&UpgradeOffer::minimal()).unwrap();
        assert_eq!(json, r#"{"message":"Feature requires premium subscription"}"#);
    }
}
