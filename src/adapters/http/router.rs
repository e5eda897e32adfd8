//! Top-level HTTP router.
//!
//! Mounts every feature router under `/api`, adds `/health`, and wraps the
//! whole tree in the auth layer plus the usual request-id, tracing, CORS,
//! timeout and compression stack.

use std::time::Duration;

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use super::advisory::{recommendation_routes, simulation_routes, AdvisoryHandlers};
use super::middleware::{auth_middleware, AuthState};
use super::portfolio::{portfolio_routes, PortfolioHandlers};
use super::profile::{profile_routes, ProfileHandlers};
use super::projects::{project_routes, ProjectHandlers};

/// Everything the API router needs to serve requests.
#[derive(Clone)]
pub struct ApiState {
    pub advisory: AdvisoryHandlers,
    pub projects: ProjectHandlers,
    pub profile: ProfileHandlers,
    pub portfolio: PortfolioHandlers,
    pub auth: AuthState,
}

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Allowed CORS origins; empty means any origin.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Builds the complete application router.
pub fn api_router(state: ApiState, options: &RouterOptions) -> Router {
    let api = Router::new()
        .nest("/recommendations", recommendation_routes(state.advisory.clone()))
        .nest("/simulations", simulation_routes(state.advisory))
        .nest("/projects", project_routes(state.projects))
        .nest("/profile", profile_routes(state.profile))
        .nest("/portfolio", portfolio_routes(state.portfolio))
        .layer(middleware::from_fn_with_state(state.auth, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(&options.cors_origins))
                .layer(TimeoutLayer::new(options.request_timeout))
                .layer(CompressionLayer::new()),
        )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "service": "infravest" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(allowed))
}
