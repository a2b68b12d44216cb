//! HTTP adapter for premium endpoints.
//!
//! - `GET /api/premium/features` - Features available to the caller
//! - `GET /api/premium/features/:feature` - Access check for one feature
//! - `GET /api/premium/principles` - Premium principles
//! - `GET /api/premium/levels/:level/features` - Features included in a level
//! - `GET /api/prayer/rosary`, `/api/garden`, `/api/garden/shared` - Gated features
//! - `GET /api/health` - Liveness

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{PremiumApiError, PremiumAppState};
pub use routes::{api_router, gated_routes, premium_routes};
