//! HTTP handlers for recommendation and simulation endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequestId, RequireAuth};
use crate::application::handlers::advisory::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler,
    GetLatestRecommendationsHandler, GetLatestRecommendationsQuery, SimulateInvestmentCommand,
    SimulateInvestmentHandler,
};
use crate::domain::foundation::{CommandMetadata, DomainError, ErrorCode, ProjectId};

use super::dto::{
    LatestRecommendationsResponse, RecommendationsResponse, SimulateInvestmentRequest,
    SimulationResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AdvisoryHandlers {
    generate_handler: Arc<GenerateRecommendationsHandler>,
    latest_handler: Arc<GetLatestRecommendationsHandler>,
    simulate_handler: Arc<SimulateInvestmentHandler>,
}

impl AdvisoryHandlers {
    pub fn new(
        generate_handler: Arc<GenerateRecommendationsHandler>,
        latest_handler: Arc<GetLatestRecommendationsHandler>,
        simulate_handler: Arc<SimulateInvestmentHandler>,
    ) -> Self {
        Self {
            generate_handler,
            latest_handler,
            simulate_handler,
        }
    }
}

pub(crate) fn parse_project_id(raw: &str) -> Result<ProjectId, ApiError> {
    raw.parse::<ProjectId>().map_err(|e| ApiError(e.into()))
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/recommendations - Generate and store recommendations
pub async fn generate_recommendations(
    State(handlers): State<AdvisoryHandlers>,
    RequireAuth(user): RequireAuth,
    RequestId(correlation_id): RequestId,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = GenerateRecommendationsCommand {
        user_id: user.id.clone(),
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    let result = handlers.generate_handler.handle(cmd, metadata).await?;
    Ok((StatusCode::OK, Json(RecommendationsResponse::from(result))))
}

/// GET /api/recommendations/latest - Last stored recommendations
pub async fn latest_recommendations(
    State(handlers): State<AdvisoryHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetLatestRecommendationsQuery {
        user_id: user.id.clone(),
    };

    match handlers.latest_handler.handle(query).await? {
        Some(record) => Ok((StatusCode::OK, Json(LatestRecommendationsResponse::from(record)))),
        None => Err(ApiError(DomainError::new(
            ErrorCode::RecommendationNotFound,
            "No recommendations generated yet",
        ))),
    }
}

/// POST /api/simulations - Simulate an investment
pub async fn simulate_investment(
    State(handlers): State<AdvisoryHandlers>,
    RequireAuth(user): RequireAuth,
    RequestId(correlation_id): RequestId,
    Json(req): Json<SimulateInvestmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = SimulateInvestmentCommand {
        user_id: user.id.clone(),
        project_id: parse_project_id(&req.project_id)?,
        amount: req.amount,
        duration_months: req.duration,
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    let result = handlers.simulate_handler.handle(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(SimulationResponse::from(result))))
}
