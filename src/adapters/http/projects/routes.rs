//! HTTP routes for project endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_token, get_suitability, get_token_balance, invest, ProjectHandlers};

/// Routes mounted under `/api/projects`.
pub fn project_routes(handlers: ProjectHandlers) -> Router {
    Router::new()
        .route("/:id/suitability", get(get_suitability))
        .route("/:id/token", post(create_token))
        .route("/:id/token/balance", get(get_token_balance))
        .route("/:id/invest", post(invest))
        .with_state(handlers)
}
