//! Prayer feature identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Identifies a single prayer capability a request may try to use.
///
/// Identifiers are opaque: anything non-empty is a valid feature, and
/// features absent from the catalog fall under the fail-closed default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrayerFeature(Cow<'static, str>);

impl PrayerFeature {
    /// Core rosary prayer, available to every user.
    pub const CORE_ROSARY: PrayerFeature = PrayerFeature::from_static("core_rosary");
    /// Core prayer garden, available to every user.
    pub const BASIC_GARDEN: PrayerFeature = PrayerFeature::from_static("basic_garden");
    /// Rosary with visualization and audio guidance.
    pub const ENHANCED_ROSARY: PrayerFeature = PrayerFeature::from_static("enhanced_rosary");
    /// Prayer garden with advanced scenes.
    pub const ADVANCED_GARDEN: PrayerFeature = PrayerFeature::from_static("advanced_garden");
    /// Prayer garden shared between family members.
    pub const SHARED_GARDEN: PrayerFeature = PrayerFeature::from_static("shared_garden");

    /// Creates a feature from a compile-time identifier.
    pub const fn from_static(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    /// Creates a feature, returning error if the identifier is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("feature"));
        }
        Ok(Self(Cow::Owned(id)))
    }

    /// Returns the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrayerFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PrayerFeature {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Borrow<str> for PrayerFeature {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_known_features_have_stable_ids() {
        assert_eq!(PrayerFeature::CORE_ROSARY.as_str(), "core_rosary");
        assert_eq!(PrayerFeature::BASIC_GARDEN.as_str(), "basic_garden");
        assert_eq!(PrayerFeature::ENHANCED_ROSARY.as_str(), "enhanced_rosary");
        assert_eq!(PrayerFeature::ADVANCED_GARDEN.as_str(), "advanced_garden");
        assert_eq!(PrayerFeature::SHARED_GARDEN.as_str(), "shared_garden");
    }

    #[test]
    fn owned_and_static_features_compare_equal() {
        let parsed: PrayerFeature = "enhanced_rosary".parse().unwrap();
        assert_eq!(parsed, PrayerFeature::ENHANCED_ROSARY);
    }

    #[test]
    fn empty_feature_is_rejected() {
        assert!(PrayerFeature::new("").is_err());
        assert!(PrayerFeature::new("  ").is_err());
    }

    #[test]
    fn unknown_feature_is_still_a_feature() {
        let feature = PrayerFeature::new("candle_lighting").unwrap();
        assert_eq!(feature.to_string(), "candle_lighting");
    }

    #[test]
    fn feature_serializes_transparently() {
        let json = serde_json::to_string(&PrayerFeature::SHARED_GARDEN).unwrap();
        assert_eq!(json, "\"shared_garden\"");

        let back: PrayerFeature = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PrayerFeature::SHARED_GARDEN);
    }
}
