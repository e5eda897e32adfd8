//! HTTP routes for portfolio planning endpoints.

use axum::{routing::post, Router};

use super::handlers::{plan_allocation, rebalance, simulate_performance, PortfolioHandlers};

/// Routes mounted under `/api/portfolio`.
pub fn portfolio_routes(handlers: PortfolioHandlers) -> Router {
    Router::new()
        .route("/allocation", post(plan_allocation))
        .route("/performance", post(simulate_performance))
        .route("/rebalance", post(rebalance))
        .with_state(handlers)
}
