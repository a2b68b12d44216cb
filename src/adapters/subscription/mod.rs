//! Subscription store adapters.
//!
//! - `in_memory` - HashMap-backed store for development and tests

mod in_memory;

pub use in_memory::InMemorySubscriptionStore;
