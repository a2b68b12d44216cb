//! HTTP adapters - REST API and request middleware.

pub mod middleware;
pub mod premium;
pub mod shutdown;

pub use premium::{api_router, PremiumAppState};
pub use shutdown::shutdown_signal;
