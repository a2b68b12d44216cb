//! In-Memory Subscription Store Adapter
//!
//! Holds subscriptions in memory, keyed by user.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::premium::Subscription;
use crate::ports::SubscriptionStore;

/// In-memory subscription store
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionStore {
    subscriptions: Arc<RwLock<HashMap<UserId, Subscription>>>,
    force_error: Arc<RwLock<Option<DomainError>>>,
}

impl InMemorySubscriptionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with subscriptions
    pub fn with_subscriptions(subscriptions: impl IntoIterator<Item = Subscription>) -> Self {
        let map = subscriptions
            .into_iter()
            .map(|s| (s.user_id.clone(), s))
            .collect();
        Self {
            subscriptions: Arc::new(RwLock::new(map)),
            force_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Insert or replace a user's subscription (the billing side's write)
    pub async fn upsert(&self, subscription: Subscription) {
        self.subscriptions
            .write()
            .await
            .insert(subscription.user_id.clone(), subscription);
    }

    /// Make every lookup fail with `error` (for testing the failure path).
    ///
    /// The returned error carries the looked-up `user_id` as a detail.
    pub async fn fail_with(&self, error: DomainError) {
        *self.force_error.write().await = Some(error);
    }

    /// Get the number of stored subscriptions
    pub async fn len(&self) -> usize {
        self.subscriptions.read().await.len()
    }

    /// Returns true if nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.subscriptions.read().await.is_empty()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn load_subscription(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, DomainError> {
        if let Some(error) = self.force_error.read().await.clone() {
            return Err(error.with_detail("user_id", user_id.as_str()));
        }

        Ok(self.subscriptions.read().await.get(user_id).cloned())
    }
}
