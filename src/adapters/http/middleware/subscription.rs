//! Subscription middleware and extractor for axum.
//!
//! This module provides:
//! - `subscription_middleware` - Layer that resolves the caller's subscription
//!   level and injects a `SubscriptionContext` into request extensions
//! - `CurrentSubscription` - Extractor that reads the context back
//!
//! ```text
//! Request → subscription_middleware → IdentityResolver → SubscriptionStore
//!                   ↓
//!           SubscriptionContext in extensions → feature gate / handler
//! ```
//!
//! The middleware never blocks a request. Anonymous callers, callers with no
//! subscription, and callers whose lookup fails all proceed at Basic.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::domain::foundation::UserId;
use crate::domain::premium::SubscriptionLevel;
use crate::ports::{IdentityResolver, SubscriptionStore};

/// Collaborators the subscription middleware needs.
#[derive(Clone)]
pub struct SubscriptionState {
    pub resolver: Arc<dyn IdentityResolver>,
    pub store: Arc<dyn SubscriptionStore>,
}

impl SubscriptionState {
    pub fn new(resolver: Arc<dyn IdentityResolver>, store: Arc<dyn SubscriptionStore>) -> Self {
        Self { resolver, store }
    }

    /// Resolve the subscription context for a set of request headers.
    pub async fn resolve(&self, headers: &HeaderMap) -> SubscriptionContext {
        let Some(user_id) = self.resolver.resolve(headers).await else {
            tracing::debug!("Anonymous caller, using Basic");
            return SubscriptionContext::anonymous();
        };

        let level = match self.store.load_subscription(&user_id).await {
            Ok(Some(subscription)) => subscription.current_level,
            Ok(None) => SubscriptionLevel::Basic,
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    error = %e,
                    "Subscription lookup failed, falling back to Basic"
                );
                SubscriptionLevel::Basic
            }
        };

        tracing::debug!(user_id = %user_id, level = %level, "Resolved subscription level");
        SubscriptionContext::for_user(user_id, level)
    }
}

/// Subscription level resolved for the current request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionContext {
    pub level: SubscriptionLevel,
    pub user_id: Option<UserId>,
}

impl SubscriptionContext {
    /// Context for a caller with no resolvable identity.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_user(user_id: UserId, level: SubscriptionLevel) -> Self {
        Self {
            level,
            user_id: Some(user_id),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }
}

/// Resolves the caller's subscription level and stores it in request extensions.
pub async fn subscription_middleware(
    State(state): State<SubscriptionState>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = state.resolve(request.headers()).await;
    request.extensions_mut().insert(context);
    next.run(request).await
}

/// Extractor for the request's subscription context.
///
/// Falls back to an anonymous Basic context when the middleware did not run.
///
/// # Example
///
/// ```ignore
/// async fn my_handler(CurrentSubscription(ctx): CurrentSubscription) -> String {
///     format!("You are on {}", ctx.level)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentSubscription(pub SubscriptionContext);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentSubscription
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<SubscriptionContext>()
            .cloned()
            .unwrap_or_default();
        Ok(CurrentSubscription(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::HeaderIdentityResolver;
    use crate::adapters::subscription::InMemorySubscriptionStore;
    use crate::domain::foundation::{DomainError, PlanId};
    use crate::domain::premium::Subscription;
    use axum::http::{HeaderValue, Request as HttpRequest};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn headers_for(id: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", HeaderValue::from_str(id).unwrap());
        headers
    }

    fn state_with(store: InMemorySubscriptionStore) -> SubscriptionState {
        SubscriptionState::new(Arc::new(HeaderIdentityResolver::default()), Arc::new(store))
    }

    fn premium(id: &str) -> Subscription {
        Subscription::active(
            user(id),
            PlanId::new("premium-monthly").unwrap(),
            SubscriptionLevel::Premium,
            30,
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Resolution Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn anonymous_caller_is_basic() {
        let state = state_with(InMemorySubscriptionStore::new());

        let context = state.resolve(&HeaderMap::new()).await;

        assert_eq!(context.level, SubscriptionLevel::Basic);
        assert!(context.is_anonymous());
    }

    #[tokio::test]
    async fn subscriber_gets_current_level() {
        let state = state_with(InMemorySubscriptionStore::with_subscriptions([premium("u1")]));

        let context = state.resolve(&headers_for("u1")).await;

        assert_eq!(context, SubscriptionContext::for_user(user("u1"), SubscriptionLevel::Premium));
    }

    #[tokio::test]
    async fn user_without_subscription_is_basic() {
        let state = state_with(InMemorySubscriptionStore::with_subscriptions([premium("u1")]));

        let context = state.resolve(&headers_for("u2")).await;

        assert_eq!(context.level, SubscriptionLevel::Basic);
        assert_eq!(context.user_id, Some(user("u2")));
    }

    #[tokio::test]
    async fn lookup_failure_falls_back_to_basic() {
        let store = InMemorySubscriptionStore::with_subscriptions([premium("u1")]);
        store
            .fail_with(DomainError::store_unavailable("connection reset"))
            .await;
        let state = state_with(store);

        let context = state.resolve(&headers_for("u1")).await;

        assert_eq!(context.level, SubscriptionLevel::Basic);
        assert!(!context.is_anonymous());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // CurrentSubscription Extractor Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn current_subscription_reads_extensions() {
        let mut request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        request
            .extensions_mut()
            .insert(SubscriptionContext::for_user(user("u1"), SubscriptionLevel::Family));
        let (mut parts, _body) = request.into_parts();

        let CurrentSubscription(context) = CurrentSubscription::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(context.level, SubscriptionLevel::Family);
    }

    #[tokio::test]
    async fn current_subscription_defaults_to_basic() {
        let request: HttpRequest<()> = HttpRequest::builder().uri("/test").body(()).unwrap();
        let (mut parts, _body) = request.into_parts();

        let CurrentSubscription(context) = CurrentSubscription::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(context, SubscriptionContext::anonymous());
        assert_eq!(context.level, SubscriptionLevel::Basic);
    }
}
