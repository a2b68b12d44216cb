//! Access policy over a feature catalog.
//!
//! Answers "may level L use feature F" and, for the feature gate, what to do
//! when the answer is no. Every function here is total and side-effect free.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::Serialize;

use super::{FeatureCatalog, FeatureEntry, PrayerFeature, SubscriptionLevel};

/// Outcome of checking one feature for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureDecision {
    /// The level satisfies the feature; serve it unchanged.
    Granted,

    /// A core feature was denied; serve its basic counterpart instead.
    Substituted {
        requested: PrayerFeature,
        provided: PrayerFeature,
    },

    /// A non-core feature was denied; offer an upgrade.
    UpgradeOffered {
        feature: PrayerFeature,
        required_level: SubscriptionLevel,
    },
}

impl FeatureDecision {
    /// Returns true if the requested feature is served as-is.
    pub fn is_granted(&self) -> bool {
        matches!(self, FeatureDecision::Granted)
    }
}

/// Result of a feature access query, as reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureResponse {
    pub has_access: bool,
    pub feature: PrayerFeature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Access policy backed by a shared, immutable catalog.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    catalog: Arc<FeatureCatalog>,
}

impl AccessPolicy {
    pub fn new(catalog: Arc<FeatureCatalog>) -> Self {
        Self { catalog }
    }

    /// Policy over [`FeatureCatalog::standard`].
    pub fn standard() -> Self {
        Self::new(Arc::new(FeatureCatalog::standard()))
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    /// True iff the feature is catalogued and `level` meets its requirement.
    ///
    /// Uncatalogued features are denied at every level.
    pub fn has_feature_access(&self, level: SubscriptionLevel, feature: &PrayerFeature) -> bool {
        self.catalog
            .get(feature)
            .map(|entry| level >= entry.required_level)
            .unwrap_or(false)
    }

    /// Minimum level for a feature; uncatalogued features require the highest level.
    pub fn required_level(&self, feature: &PrayerFeature) -> SubscriptionLevel {
        self.catalog
            .get(feature)
            .map(|entry| entry.required_level)
            .unwrap_or_else(SubscriptionLevel::highest)
    }

    /// Every catalogued feature whose requirement is at or below `level`.
    pub fn features_at_or_below(&self, level: SubscriptionLevel) -> BTreeSet<PrayerFeature> {
        self.catalog
            .entries()
            .filter(|entry| entry.required_level <= level)
            .map(|entry| entry.feature.clone())
            .collect()
    }

    pub fn basic_features(&self) -> BTreeSet<PrayerFeature> {
        self.features_at_or_below(SubscriptionLevel::Basic)
    }

    /// Premium features plus everything Basic.
    pub fn premium_features(&self) -> BTreeSet<PrayerFeature> {
        self.features_at_or_below(SubscriptionLevel::Premium)
    }

    /// The whole catalog.
    pub fn family_features(&self) -> BTreeSet<PrayerFeature> {
        self.features_at_or_below(SubscriptionLevel::Family)
    }

    /// Core spiritual features always have some accessible form.
    pub fn is_core_spiritual_feature(&self, feature: &PrayerFeature) -> bool {
        self.catalog
            .get(feature)
            .map(|entry| entry.core)
            .unwrap_or(false)
    }

    /// Basic counterpart of a feature, or the feature itself if it has none.
    pub fn basic_version_of(&self, feature: &PrayerFeature) -> PrayerFeature {
        self.catalog
            .get(feature)
            .and_then(|entry| entry.basic_counterpart.clone())
            .unwrap_or_else(|| feature.clone())
    }

    /// Decide how a request at `level` for `feature` is served.
    pub fn evaluate(&self, level: SubscriptionLevel, feature: &PrayerFeature) -> FeatureDecision {
        if self.has_feature_access(level, feature) {
            return FeatureDecision::Granted;
        }

        if self.is_core_spiritual_feature(feature) {
            return FeatureDecision::Substituted {
                requested: feature.clone(),
                provided: self.basic_version_of(feature),
            };
        }

        FeatureDecision::UpgradeOffered {
            feature: feature.clone(),
            required_level: self.required_level(feature),
        }
    }

    /// Access summary for a single feature.
    pub fn check(&self, level: SubscriptionLevel, feature: &PrayerFeature) -> FeatureResponse {
        let has_access = self.has_feature_access(level, feature);
        let message = if has_access {
            None
        } else if self.is_core_spiritual_feature(feature) {
            Some(format!(
                "A basic version of {} is available to you.",
                self.display_name(feature)
            ))
        } else {
            Some(format!(
                "{} is available with a {} subscription.",
                self.display_name(feature),
                self.required_level(feature).display_name()
            ))
        };

        FeatureResponse {
            has_access,
            feature: feature.clone(),
            message,
        }
    }

    /// Catalog entry for a feature, if any.
    pub fn entry(&self, feature: &PrayerFeature) -> Option<&FeatureEntry> {
        self.catalog.get(feature)
    }

    fn display_name(&self, feature: &PrayerFeature) -> String {
        self.catalog
            .get(feature)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| feature.to_string())
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
