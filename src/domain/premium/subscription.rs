//! Subscription records owned by billing.
//!
//! The premium layer never mutates these; it reads `current_level` once per
//! request.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PlanId, SubscriptionId, Timestamp, UserId};

use super::SubscriptionLevel;

/// Billing status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid and current.
    Active,

    /// Free trial of a paid level.
    Trialing,

    /// Payment failed, retries in progress.
    PastDue,

    /// Cancelled by the user; runs until `end_date`.
    Cancelled,

    /// Ended. Billing should have reset the level to Basic.
    Expired,
}

impl SubscriptionStatus {
    /// Returns true if billing still honours the subscription.
    pub fn has_access(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Active
                | SubscriptionStatus::Trialing
                | SubscriptionStatus::PastDue
                | SubscriptionStatus::Cancelled
        )
    }
}

/// A user's subscription as stored by billing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub plan_id: PlanId,
    pub status: SubscriptionStatus,
    pub current_level: SubscriptionLevel,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// New active subscription running for `days` from now.
    pub fn active(user_id: UserId, plan_id: PlanId, level: SubscriptionLevel, days: i64) -> Self {
        let now = Timestamp::now();
        Self {
            id: SubscriptionId::new(),
            user_id,
            plan_id,
            status: SubscriptionStatus::Active,
            current_level: level,
            start_date: now,
            end_date: now.add_days(days),
            created_at: now,
            updated_at: now,
        }
    }

    /// Same subscription with a different status.
    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self.updated_at = Timestamp::now();
        self
    }
}

/// A plan users can subscribe to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub name: String,
    pub description: String,
    pub level: SubscriptionLevel,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn plan() -> PlanId {
        PlanId::new("premium-monthly").unwrap()
    }

    #[test]
    fn subscription_plan_survives_json_round_trip() {
        let now = Timestamp::now();
        let family = SubscriptionPlan {
            id: PlanId::new("family-annual").unwrap(),
            name: "Family".to_string(),
            description: "Shared prayer for the whole household".to_string(),
            level: SubscriptionLevel::Family,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(&family).unwrap();
        assert_eq!(json["id"], "family-annual");
        assert_eq!(json["level"], "family");

        let parsed: SubscriptionPlan = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, family);
    }

    #[test]
    fn expired_status_has_no_access() {
        assert!(!SubscriptionStatus::Expired.has_access());
    }

    #[test]
    fn live_statuses_have_access() {
        assert!(SubscriptionStatus::Active.has_access());
        assert!(SubscriptionStatus::Trialing.has_access());
        assert!(SubscriptionStatus::PastDue.has_access());
        assert!(SubscriptionStatus::Cancelled.has_access());
    }

    #[test]
    fn active_subscription_spans_requested_days() {
        let sub = Subscription::active(user(), plan(), SubscriptionLevel::Premium, 30);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.current_level, SubscriptionLevel::Premium);
        assert!(sub.end_date.is_after(&sub.start_date));
    }

    #[test]
    fn with_status_keeps_level() {
        let sub = Subscription::active(user(), plan(), SubscriptionLevel::Family, 365)
            .with_status(SubscriptionStatus::PastDue);
        assert_eq!(sub.status, SubscriptionStatus::PastDue);
        assert_eq!(sub.current_level, SubscriptionLevel::Family);
    }

    #[test]
    fn subscription_serializes_with_snake_case_fields() {
        let sub = Subscription::active(user(), plan(), SubscriptionLevel::Premium, 30);
        let json = serde_json::to_value(&sub).unwrap();

        assert_eq!(json["user_id"], "user-1");
        assert_eq!(json["plan_id"], "premium-monthly");
        assert_eq!(json["status"], "active");
        assert_eq!(json["current_level"], "premium");
    }

    #[test]
    fn status_deserializes_snake_case() {
        let status: SubscriptionStatus = serde_json::from_str("\"past_due\"").unwrap();
        assert_eq!(status, SubscriptionStatus::PastDue);
    }
}
