//! HTTP routes for recommendation and simulation endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    generate_recommendations, latest_recommendations, simulate_investment, AdvisoryHandlers,
};

/// Routes mounted under `/api/recommendations`.
pub fn recommendation_routes(handlers: AdvisoryHandlers) -> Router {
    Router::new()
        .route("/", get(generate_recommendations))
        .route("/latest", get(latest_recommendations))
        .with_state(handlers)
}

/// Routes mounted under `/api/simulations`.
pub fn simulation_routes(handlers: AdvisoryHandlers) -> Router {
    Router::new()
        .route("/", post(simulate_investment))
        .with_state(handlers)
}
