//! `IdentityResolver` implementations.
//!
//! - `HeaderIdentityResolver` trusts a user-id header set by an upstream
//!   gateway that already authenticated the caller.
//! - `BearerIdentityResolver` validates `Authorization: Bearer <token>`
//!   through a `SessionValidator`.
//!
//! Neither ever rejects a request. Anything that does not yield a user id
//! makes the caller anonymous.

use std::sync::Arc;

use async_trait::async_trait;
use http::header::{HeaderName, AUTHORIZATION};
use http::HeaderMap;
use secrecy::SecretString;

use super::jwt::{JwtConfig, JwtSessionValidator};
use crate::config::{AuthConfig, IdentityMode, ValidationError};
use crate::domain::foundation::{AuthError, UserId};
use crate::ports::{IdentityResolver, SessionValidator};

pub use crate::config::DEFAULT_USER_ID_HEADER;

/// Reads the caller's id from a trusted header.
#[derive(Debug, Clone)]
pub struct HeaderIdentityResolver {
    header: HeaderName,
}

impl HeaderIdentityResolver {
    pub fn new(header: HeaderName) -> Self {
        Self { header }
    }
}

impl Default for HeaderIdentityResolver {
    fn default() -> Self {
        Self::new(HeaderName::from_static(DEFAULT_USER_ID_HEADER))
    }
}

#[async_trait]
impl IdentityResolver for HeaderIdentityResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<UserId> {
        headers
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::new(s.trim()).ok())
    }
}

/// Resolves callers from bearer tokens.
#[derive(Clone)]
pub struct BearerIdentityResolver {
    validator: Arc<dyn SessionValidator>,
}

impl BearerIdentityResolver {
    pub fn new(validator: Arc<dyn SessionValidator>) -> Self {
        Self { validator }
    }
}

#[async_trait]
impl IdentityResolver for BearerIdentityResolver {
    async fn resolve(&self, headers: &HeaderMap) -> Option<UserId> {
        let token = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))?;

        match self.validator.validate(token).await {
            Ok(user) => Some(user.id),
            Err(AuthError::ServiceUnavailable(msg)) => {
                tracing::error!("Auth service unavailable, treating caller as anonymous: {}", msg);
                None
            }
            Err(e) => {
                tracing::warn!("Rejected bearer token, treating caller as anonymous: {}", e);
                None
            }
        }
    }
}

/// Build the identity resolver selected by configuration.
///
/// # Errors
///
/// Returns `ValidationError` if the header name is invalid or bearer mode
/// is missing its JWT settings.
pub fn identity_resolver_from_config(
    config: &AuthConfig,
) -> Result<Arc<dyn IdentityResolver>, ValidationError> {
    match config.mode {
        IdentityMode::Header => Ok(Arc::new(HeaderIdentityResolver::new(
            config.user_id_header_name()?,
        ))),
        IdentityMode::Bearer => {
            let secret = config
                .jwt_secret
                .clone()
                .ok_or(ValidationError::MissingRequired("AUTH__JWT_SECRET"))?;
            let issuer = config
                .jwt_issuer
                .clone()
                .ok_or(ValidationError::MissingRequired("AUTH__JWT_ISSUER"))?;
            let audience = config
                .jwt_audience
                .clone()
                .ok_or(ValidationError::MissingRequired("AUTH__JWT_AUDIENCE"))?;

            let jwt = JwtConfig::new(SecretString::new(secret), issuer, audience);
            let validator: Arc<dyn SessionValidator> = Arc::new(JwtSessionValidator::new(&jwt));
            Ok(Arc::new(BearerIdentityResolver::new(validator)))
        }
    }
}
