//! Axum router configuration for premium endpoints.

use axum::{middleware, routing::get, Router};

use crate::adapters::http::middleware::{
    feature_gate_middleware, subscription_middleware, SubscriptionState,
};
use crate::domain::premium::PrayerFeature;

use super::handlers::{
    check_feature, garden, health, list_level_features, list_my_features, list_principles,
    rosary, shared_garden, PremiumAppState,
};

/// Create the premium catalog router.
///
/// # Routes
/// - `GET /features` - Features available to the caller
/// - `GET /features/:feature` - Access check for one feature
/// - `GET /principles` - Premium principles
/// - `GET /levels/:level/features` - Features included in a level
pub fn premium_routes() -> Router<PremiumAppState> {
    Router::new()
        .route("/features", get(list_my_features))
        .route("/features/:feature", get(check_feature))
        .route("/principles", get(list_principles))
        .route("/levels/:level/features", get(list_level_features))
}

/// Create the feature-gated prayer routes.
///
/// Each route sits behind its own feature gate.
///
/// # Routes
/// - `GET /prayer/rosary` - Enhanced rosary, basic rosary as fallback
/// - `GET /garden` - Advanced garden, basic garden as fallback
/// - `GET /garden/shared` - Shared family garden, upgrade offer otherwise
pub fn gated_routes(state: &PremiumAppState) -> Router<PremiumAppState> {
    Router::new()
        .route(
            "/prayer/rosary",
            get(rosary).layer(middleware::from_fn_with_state(
                state.gate(PrayerFeature::ENHANCED_ROSARY),
                feature_gate_middleware,
            )),
        )
        .route(
            "/garden",
            get(garden).layer(middleware::from_fn_with_state(
                state.gate(PrayerFeature::ADVANCED_GARDEN),
                feature_gate_middleware,
            )),
        )
        .route(
            "/garden/shared",
            get(shared_garden).layer(middleware::from_fn_with_state(
                state.gate(PrayerFeature::SHARED_GARDEN),
                feature_gate_middleware,
            )),
        )
}

/// Create the complete API router, mounted at `/api`.
///
/// Every route runs behind `subscription_middleware`, so handlers and gates
/// always see a resolved subscription level.
///
/// # Example
///
/// ```ignore
/// let app = api_router(PremiumAppState::default(), subscription_state);
/// axum::serve(listener, app).await?;
/// ```
pub fn api_router(state: PremiumAppState, subscription: SubscriptionState) -> Router {
    let api = Router::new()
        .nest("/premium", premium_routes())
        .merge(gated_routes(&state))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(
            subscription,
            subscription_middleware,
        ))
        .with_state(state);

    Router::new().nest("/api", api)
}
