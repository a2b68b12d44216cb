//! Subscription level definitions.
//!
//! Represents the ordered subscription tiers available in PrayerGlow.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Subscription tier of a user.
///
/// Variant order is significant: a higher level satisfies every feature
/// requirement of the levels below it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionLevel {
    /// Free level with core prayer functionality.
    #[default]
    Basic,

    /// Enhanced prayer experiences.
    Premium,

    /// Shared prayer features for families.
    Family,
}

impl SubscriptionLevel {
    /// Every level, lowest first.
    pub const fn all() -> [SubscriptionLevel; 3] {
        [
            SubscriptionLevel::Basic,
            SubscriptionLevel::Premium,
            SubscriptionLevel::Family,
        ]
    }

    /// The top of the ordering; unknown features require this level.
    pub const fn highest() -> Self {
        SubscriptionLevel::Family
    }

    /// Returns true if this level is a paid level.
    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionLevel::Basic)
    }

    /// Returns the display name for this level.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionLevel::Basic => "Basic",
            SubscriptionLevel::Premium => "Premium",
            SubscriptionLevel::Family => "Family",
        }
    }

    /// Returns the numeric rank of this level for comparison.
    pub fn rank(&self) -> u8 {
        match self {
            SubscriptionLevel::Basic => 0,
            SubscriptionLevel::Premium => 1,
            SubscriptionLevel::Family => 2,
        }
    }
}

impl std::fmt::Display for SubscriptionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for SubscriptionLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(SubscriptionLevel::Basic),
            "premium" => Ok(SubscriptionLevel::Premium),
            "family" => Ok(SubscriptionLevel::Family),
            other => Err(ValidationError::invalid_format(
                "subscription_level",
                format!("unknown level '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_basic_premium_family() {
        assert!(SubscriptionLevel::Basic < SubscriptionLevel::Premium);
        assert!(SubscriptionLevel::Premium < SubscriptionLevel::Family);
    }

    #[test]
    fn rank_agrees_with_ordering() {
        for a in SubscriptionLevel::all() {
            for b in SubscriptionLevel::all() {
                assert_eq!(a < b, a.rank() < b.rank());
            }
        }
    }

    #[test]
    fn default_level_is_basic() {
        assert_eq!(SubscriptionLevel::default(), SubscriptionLevel::Basic);
    }

    #[test]
    fn highest_is_family() {
        assert_eq!(SubscriptionLevel::highest(), SubscriptionLevel::Family);
        assert_eq!(
            SubscriptionLevel::all().iter().max(),
            Some(&SubscriptionLevel::highest())
        );
    }

    #[test]
    fn basic_is_not_paid() {
        assert!(!SubscriptionLevel::Basic.is_paid());
        assert!(SubscriptionLevel::Premium.is_paid());
        assert!(SubscriptionLevel::Family.is_paid());
    }

    #[test]
    fn display_names_are_correct() {
        assert_eq!(SubscriptionLevel::Basic.to_string(), "Basic");
        assert_eq!(SubscriptionLevel::Premium.to_string(), "Premium");
        assert_eq!(SubscriptionLevel::Family.to_string(), "Family");
    }

    #[test]
    fn level_serializes_lowercase() {
        let json = serde_json::to_string(&SubscriptionLevel::Premium).unwrap();
        assert_eq!(json, "\"premium\"");
    }

    #[test]
    fn level_deserializes_from_lowercase() {
        let level: SubscriptionLevel = serde_json::from_str("\"family\"").unwrap();
        assert_eq!(level, SubscriptionLevel::Family);
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("Premium".parse(), Ok(SubscriptionLevel::Premium));
        assert_eq!(" BASIC ".parse(), Ok(SubscriptionLevel::Basic));
        assert!("gold".parse::<SubscriptionLevel>().is_err());
    }
}
