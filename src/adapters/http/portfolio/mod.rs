//! HTTP adapter for portfolio planning endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AllocationRequest, AllocationResponse, PerformanceRequest, PerformanceResponse,
    RebalanceRequest, RebalanceResponse,
};
pub use handlers::PortfolioHandlers;
pub use routes::portfolio_routes;
