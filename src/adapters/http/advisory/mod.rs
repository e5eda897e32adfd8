//! HTTP adapter for recommendation and simulation endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    LatestRecommendationsResponse, RecommendationsResponse, SimulateInvestmentRequest,
    SimulationResponse,
};
pub use handlers::AdvisoryHandlers;
pub(crate) use handlers::parse_project_id;
pub use routes::{recommendation_routes, simulation_routes};
