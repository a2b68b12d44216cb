//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the premium domain to the outside world:
//! - `auth` - Identity resolution (trusted header, bearer JWT)
//! - `subscription` - Subscription store implementations
//! - `http` - Axum middleware and routes

pub mod auth;
pub mod http;
pub mod subscription;
