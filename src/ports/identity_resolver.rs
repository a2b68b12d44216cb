//! Identity resolution port.
//!
//! Turns an inbound request into an opaque user id. Resolution never fails
//! the request: a caller who cannot be identified is simply anonymous, and
//! the subscription middleware treats anonymous callers as Basic.

use async_trait::async_trait;
use http::HeaderMap;

use crate::domain::foundation::UserId;

/// Resolves the caller behind a request.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns `None` for anonymous callers.
    async fn resolve(&self, headers: &HeaderMap) -> Option<UserId>;
}
