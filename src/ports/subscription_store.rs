//! Subscription store port (read side).
//!
//! Billing owns subscription data; the premium layer only reads a user's
//! current subscription, once per request.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::premium::Subscription;

/// Reads subscriptions written by the billing system.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Current subscription for a user.
    ///
    /// Returns `Ok(None)` if the user has never subscribed. Errors are for
    /// an unreachable or failing store.
    async fn load_subscription(&self, user_id: &UserId)
        -> Result<Option<Subscription>, DomainError>;
}
