//! HTTP routes for profile endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    get_profile, record_knowledge_score, register, update_risk_profile, ProfileHandlers,
};

/// Routes mounted under `/api/profile`.
pub fn profile_routes(handlers: ProfileHandlers) -> Router {
    Router::new()
        .route("/", get(get_profile).post(register))
        .route("/risk", put(update_risk_profile))
        .route("/knowledge", put(record_knowledge_score))
        .with_state(handlers)
}
