//! HTTP handlers for project endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::advisory::parse_project_id;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::{RequestId, RequireAuth};
use crate::application::handlers::advisory::{
    GetProjectSuitabilityHandler, GetProjectSuitabilityQuery,
};
use crate::application::handlers::project::{
    CreateProjectTokenCommand, CreateProjectTokenHandler, GetTokenBalanceHandler,
    GetTokenBalanceQuery, InvestInProjectCommand, InvestInProjectHandler,
};
use crate::domain::foundation::CommandMetadata;

use super::dto::{
    BalanceParams, BalanceResponse, InvestRequest, InvestResponse, SuitabilityResponse,
    TokenCreatedResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProjectHandlers {
    suitability_handler: Arc<GetProjectSuitabilityHandler>,
    create_token_handler: Arc<CreateProjectTokenHandler>,
    balance_handler: Arc<GetTokenBalanceHandler>,
    invest_handler: Arc<InvestInProjectHandler>,
}

impl ProjectHandlers {
    pub fn new(
        suitability_handler: Arc<GetProjectSuitabilityHandler>,
        create_token_handler: Arc<CreateProjectTokenHandler>,
        balance_handler: Arc<GetTokenBalanceHandler>,
        invest_handler: Arc<InvestInProjectHandler>,
    ) -> Self {
        Self {
            suitability_handler,
            create_token_handler,
            balance_handler,
            invest_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/projects/:id/suitability - Score and advice for one project
pub async fn get_suitability(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetProjectSuitabilityQuery {
        user_id: user.id,
        project_id: parse_project_id(&project_id)?,
    };

    let view = handlers.suitability_handler.handle(query).await?;
    Ok((StatusCode::OK, Json(SuitabilityResponse::from(view))))
}

/// POST /api/projects/:id/token - Mint the project's ledger token
pub async fn create_token(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    RequestId(correlation_id): RequestId,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = CreateProjectTokenCommand {
        project_id: parse_project_id(&project_id)?,
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    let result = handlers.create_token_handler.handle(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(TokenCreatedResponse::from(result))))
}

/// GET /api/projects/:id/token/balance - Cached token balance
pub async fn get_token_balance(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    Path(project_id): Path<String>,
    Query(params): Query<BalanceParams>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetTokenBalanceQuery {
        project_id: parse_project_id(&project_id)?,
        account_id: params
            .account_id
            .unwrap_or_else(|| user.id.as_str().to_string()),
    };

    let balance = handlers.balance_handler.handle(query).await?;
    Ok((
        StatusCode::OK,
        Json(BalanceResponse {
            success: true,
            balance,
        }),
    ))
}

/// POST /api/projects/:id/invest - Buy project tokens
pub async fn invest(
    State(handlers): State<ProjectHandlers>,
    RequireAuth(user): RequireAuth,
    RequestId(correlation_id): RequestId,
    Path(project_id): Path<String>,
    Json(req): Json<InvestRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = InvestInProjectCommand {
        user_id: user.id.clone(),
        project_id: parse_project_id(&project_id)?,
        amount: req.amount,
        account_id: req.account_id,
    };
    let metadata = CommandMetadata::new(user.id).with_correlation_id(correlation_id);

    let result = handlers.invest_handler.handle(cmd, metadata).await?;
    Ok((StatusCode::CREATED, Json(InvestResponse::from(result))))
}
