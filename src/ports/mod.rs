//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the premium domain and the outside world. Adapters implement these ports.
//!
//! - `IdentityResolver` - Who is calling (or nobody)
//! - `SessionValidator` - Bearer token validation behind identity resolution
//! - `SubscriptionStore` - Read access to billing-owned subscriptions

mod identity_resolver;
mod session_validator;
mod subscription_store;

pub use identity_resolver::IdentityResolver;
pub use session_validator::SessionValidator;
pub use subscription_store::SubscriptionStore;
