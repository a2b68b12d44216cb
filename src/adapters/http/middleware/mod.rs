//! HTTP middleware for axum.
//!
//! - `subscription` - Resolves the caller's subscription level per request
//! - `feature_gate` - Grants, substitutes, or offers an upgrade for one feature

pub mod feature_gate;
pub mod subscription;

pub use feature_gate::{
    feature_gate_middleware, FeatureFallback, FeatureGate, OptionalFallback, UpgradeDetails,
    UpgradeInfo, UpgradeOffer, UpgradeSettings, UPGRADE_REQUIRED_MESSAGE,
};
pub use subscription::{
    subscription_middleware, CurrentSubscription, SubscriptionContext, SubscriptionState,
};
