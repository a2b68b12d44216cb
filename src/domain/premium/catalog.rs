//! Feature catalog configuration.
//!
//! Maps every known prayer feature to the minimum subscription level it
//! requires. A catalog is assembled once at startup and never mutated; share
//! it as `Arc<FeatureCatalog>`.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use thiserror::Error;

use super::{PrayerFeature, SubscriptionLevel};

/// Catalog entry describing one feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureEntry {
    /// The feature this entry describes.
    pub feature: PrayerFeature,
    /// Minimum level that unlocks the feature.
    pub required_level: SubscriptionLevel,
    /// Human-readable name, used in upgrade offers.
    pub name: String,
    /// Short description, used in upgrade offers.
    pub description: String,
    /// Core spiritual features degrade instead of being denied.
    pub core: bool,
    /// Feature served instead when a core feature is denied.
    pub basic_counterpart: Option<PrayerFeature>,
}

/// Errors raised while assembling a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Feature '{0}' is declared more than once")]
    DuplicateFeature(PrayerFeature),

    #[error("Feature '{feature}' falls back to '{counterpart}', which is not in the catalog")]
    UnknownCounterpart {
        feature: PrayerFeature,
        counterpart: PrayerFeature,
    },

    #[error("Feature '{feature}' falls back to '{counterpart}', which is not a Basic feature")]
    CounterpartNotBasic {
        feature: PrayerFeature,
        counterpart: PrayerFeature,
    },

    #[error("Feature '{0}' declares a basic counterpart but is not a core feature")]
    CounterpartOnNonCore(PrayerFeature),

    #[error("Core feature '{0}' requires more than Basic but has no basic counterpart")]
    CoreWithoutBasicForm(PrayerFeature),
}

/// Immutable feature-to-level mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCatalog {
    entries: HashMap<PrayerFeature, FeatureEntry>,
}

impl FeatureCatalog {
    /// Start assembling a custom catalog.
    pub fn builder() -> FeatureCatalogBuilder {
        FeatureCatalogBuilder::default()
    }

    /// The catalog PrayerGlow ships with.
    ///
    /// | Feature | Level | Core | Falls back to |
    /// |---------|-------|------|---------------|
    /// | core_rosary | Basic | yes | - |
    /// | basic_garden | Basic | yes | - |
    /// | enhanced_rosary | Premium | yes | core_rosary |
    /// | advanced_garden | Premium | yes | basic_garden |
    /// | shared_garden | Family | no | - |
    pub fn standard() -> Self {
        let catalog = Self::builder()
            .core(
                PrayerFeature::CORE_ROSARY,
                SubscriptionLevel::Basic,
                "Rosary Prayer",
                "Pray the rosary with guided mysteries.",
            )
            .core(
                PrayerFeature::BASIC_GARDEN,
                SubscriptionLevel::Basic,
                "Prayer Garden",
                "Watch your prayer garden grow with every prayer.",
            )
            .core_with_fallback(
                PrayerFeature::ENHANCED_ROSARY,
                SubscriptionLevel::Premium,
                "Advanced Rosary Visualization",
                "Experience a more immersive prayer journey with realistic physics, advanced visuals, and audio guidance.",
                PrayerFeature::CORE_ROSARY,
            )
            .core_with_fallback(
                PrayerFeature::ADVANCED_GARDEN,
                SubscriptionLevel::Premium,
                "Advanced Prayer Garden",
                "Seasonal scenes, rare flowers, and ambient sound in your prayer garden.",
                PrayerFeature::BASIC_GARDEN,
            )
            .feature(
                PrayerFeature::SHARED_GARDEN,
                SubscriptionLevel::Family,
                "Shared Family Garden",
                "Grow a prayer garden together with your family.",
            )
            .build();

        match catalog {
            Ok(catalog) => catalog,
            // The standard table is fixed; a failure here is a programming error.
            Err(e) => unreachable!("standard feature catalog is invalid: {e}"),
        }
    }

    /// Look up a feature's entry.
    pub fn get(&self, feature: &PrayerFeature) -> Option<&FeatureEntry> {
        self.entries.get(feature)
    }

    /// Returns true if the feature has an entry.
    pub fn contains(&self, feature: &PrayerFeature) -> bool {
        self.entries.contains_key(feature)
    }

    /// Iterate every entry in unspecified order.
    pub fn entries(&self) -> impl Iterator<Item = &FeatureEntry> {
        self.entries.values()
    }

    /// All features, sorted by identifier.
    pub fn features(&self) -> BTreeSet<PrayerFeature> {
        self.entries.keys().cloned().collect()
    }

    /// Number of catalogued features.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no features are catalogued.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FeatureCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

/// Collects entries and validates them into a [`FeatureCatalog`].
#[derive(Debug, Default)]
pub struct FeatureCatalogBuilder {
    entries: Vec<FeatureEntry>,
}

impl FeatureCatalogBuilder {
    /// Add a non-core feature; denial yields an upgrade offer.
    pub fn feature(
        self,
        feature: PrayerFeature,
        level: SubscriptionLevel,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.entry(FeatureEntry {
            feature,
            required_level: level,
            name: name.into(),
            description: description.into(),
            core: false,
            basic_counterpart: None,
        })
    }

    /// Add a core feature that is its own basic version.
    ///
    /// Only valid at Basic level; `build` rejects anything higher.
    pub fn core(
        self,
        feature: PrayerFeature,
        level: SubscriptionLevel,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.entry(FeatureEntry {
            feature,
            required_level: level,
            name: name.into(),
            description: description.into(),
            core: true,
            basic_counterpart: None,
        })
    }

    /// Add a core feature that falls back to `counterpart` when denied.
    pub fn core_with_fallback(
        self,
        feature: PrayerFeature,
        level: SubscriptionLevel,
        name: impl Into<String>,
        description: impl Into<String>,
        counterpart: PrayerFeature,
    ) -> Self {
        self.entry(FeatureEntry {
            feature,
            required_level: level,
            name: name.into(),
            description: description.into(),
            core: true,
            basic_counterpart: Some(counterpart),
        })
    }

    /// Add a fully specified entry.
    pub fn entry(mut self, entry: FeatureEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Validate and freeze the catalog.
    ///
    /// A core feature above Basic needs a basic counterpart, and that
    /// counterpart must itself be catalogued at Basic level, so a substituted
    /// feature is always usable by the caller.
    pub fn build(self) -> Result<FeatureCatalog, CatalogError> {
        let mut entries = HashMap::with_capacity(self.entries.len());
        for entry in self.entries {
            if entries.contains_key(&entry.feature) {
                return Err(CatalogError::DuplicateFeature(entry.feature));
            }
            entries.insert(entry.feature.clone(), entry);
        }

        for entry in entries.values() {
            let Some(counterpart) = &entry.basic_counterpart else {
                if entry.core && entry.required_level > SubscriptionLevel::Basic {
                    return Err(CatalogError::CoreWithoutBasicForm(entry.feature.clone()));
                }
                continue;
            };
            if !entry.core {
                return Err(CatalogError::CounterpartOnNonCore(entry.feature.clone()));
            }
            match entries.get(counterpart) {
                None => {
                    return Err(CatalogError::UnknownCounterpart {
                        feature: entry.feature.clone(),
                        counterpart: counterpart.clone(),
                    })
                }
                Some(target) if target.required_level != SubscriptionLevel::Basic => {
                    return Err(CatalogError::CounterpartNotBasic {
                        feature: entry.feature.clone(),
                        counterpart: counterpart.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        Ok(FeatureCatalog { entries })
    }
}
