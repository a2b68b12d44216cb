//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, errors, timestamps, auth types)
//! - `premium` - Subscription levels, feature catalog and access policy

pub mod foundation;
pub mod premium;
