//! Identity adapters.
//!
//! Implementations of the `SessionValidator` and `IdentityResolver` ports:
//!
//! - `jwt` - HS256 JWT validation against a shared secret
//! - `resolvers` - Header- and bearer-token-based identity resolution
//! - `mock` - Test validator that doesn't require an identity service

mod jwt;
mod mock;
mod resolvers;

pub use jwt::{JwtConfig, JwtSessionValidator};
pub use mock::MockSessionValidator;
pub use resolvers::{
    identity_resolver_from_config, BearerIdentityResolver, HeaderIdentityResolver,
    DEFAULT_USER_ID_HEADER,
};
