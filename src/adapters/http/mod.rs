//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own module (dto, handlers, routes); `router` stitches
//! them together under `/api`.

pub mod advisory;
pub mod error;
pub mod middleware;
pub mod portfolio;
pub mod profile;
pub mod projects;
mod router;

pub use advisory::AdvisoryHandlers;
pub use error::{ApiError, ErrorResponse};
pub use portfolio::PortfolioHandlers;
pub use profile::ProfileHandlers;
pub use projects::ProjectHandlers;
pub use router::{api_router, ApiState, RouterOptions};
