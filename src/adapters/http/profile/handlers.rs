//! HTTP handlers for profile endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequestId, RequireAuth};
use crate::application::handlers::investor::{
    GetInvestorHandler, GetInvestorQuery, RecordKnowledgeScoreCommand,
    RecordKnowledgeScoreHandler, RegisterInvestorCommand, RegisterInvestorHandler,
    UpdateRiskProfileCommand, UpdateRiskProfileHandler,
};
use crate::domain::foundation::CommandMetadata;

use super::dto::{
    InvestorResponse, KnowledgeScoreRequest, RegisterRequest, RiskProfileResponse,
    UpdateRiskProfileRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProfileHandlers {
    register_handler: Arc<RegisterInvestorHandler>,
    get_handler: Arc<GetInvestorHandler>,
    update_risk_handler: Arc<UpdateRiskProfileHandler>,
    knowledge_handler: Arc<RecordKnowledgeScoreHandler>,
}

impl ProfileHandlers {
    pub fn new(
        register_handler: Arc<RegisterInvestorHandler>,
        get_handler: Arc<GetInvestorHandler>,
        update_risk_handler: Arc<UpdateRiskProfileHandler>,
        knowledge_handler: Arc<RecordKnowledgeScoreHandler>,
    ) -> Self {
        Self {
            register_handler,
            get_handler,
            update_risk_handler,
            knowledge_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/profile - Register the caller as an investor
pub async fn register(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    RequestId(correlation_id): RequestId,
    body: Option<Json<RegisterRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let cmd = RegisterInvestorCommand {
        user_id: user.id.clone(),
        email: user.email.clone(),
        display_name: req.display_name.or(user.display_name),
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    let investor = handlers.register_handler.handle(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(InvestorResponse::from(investor))))
}

/// GET /api/profile - The caller's investor record
pub async fn get_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let investor = handlers
        .get_handler
        .handle(GetInvestorQuery { user_id: user.id })
        .await?;
    Ok((StatusCode::OK, Json(InvestorResponse::from(investor))))
}

/// PUT /api/profile/risk - Apply a risk assessment
pub async fn update_risk_profile(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    RequestId(correlation_id): RequestId,
    Json(req): Json<UpdateRiskProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateRiskProfileCommand {
        user_id: user.id.clone(),
        assessment: req.into(),
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    let result = handlers.update_risk_handler.handle(cmd, metadata).await?;
    Ok((StatusCode::OK, Json(RiskProfileResponse::from(result))))
}

/// PUT /api/profile/knowledge - Record a topic knowledge score
pub async fn record_knowledge_score(
    State(handlers): State<ProfileHandlers>,
    RequireAuth(user): RequireAuth,
    RequestId(correlation_id): RequestId,
    Json(req): Json<KnowledgeScoreRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = RecordKnowledgeScoreCommand {
        user_id: user.id.clone(),
        topic: req.topic,
        score: req.score,
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    handlers.knowledge_handler.handle(cmd, metadata).await?;
    Ok(StatusCode::NO_CONTENT)
}
