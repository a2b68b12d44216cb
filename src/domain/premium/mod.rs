//! Premium domain module.
//!
//! Decides which variant of a prayer feature a subscriber may use.
//!
//! # Module Structure
//!
//! - `level` - SubscriptionLevel ordering
//! - `feature` - PrayerFeature identifiers
//! - `catalog` - Immutable feature-to-level mapping
//! - `policy` - Access checks and gate decisions over a catalog
//! - `subscription` - Billing-owned subscription records
//! - `principles` - Premium principles shown to users

mod catalog;
mod feature;
mod level;
mod policy;
mod principles;
mod subscription;

pub use catalog::{CatalogError, FeatureCatalog, FeatureCatalogBuilder, FeatureEntry};
pub use feature::PrayerFeature;
pub use level::SubscriptionLevel;
pub use policy::{AccessPolicy, FeatureDecision, FeatureResponse};
pub use principles::{premium_principles, PremiumPrinciple};
pub use subscription::{Subscription, SubscriptionPlan, SubscriptionStatus};
