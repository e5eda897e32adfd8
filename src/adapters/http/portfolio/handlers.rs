//! HTTP handlers for portfolio planning endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::adapters::http::advisory::parse_project_id;
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::portfolio::{
    PlanAllocationHandler, PlanAllocationQuery, RebalancePortfolioHandler,
    RebalancePortfolioQuery, SimulatePerformanceHandler, SimulatePerformanceQuery,
};

use super::dto::{
    AllocationRequest, AllocationResponse, PerformanceRequest, PerformanceResponse,
    RebalanceRequest, RebalanceResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct PortfolioHandlers {
    allocation_handler: Arc<PlanAllocationHandler>,
    performance_handler: Arc<SimulatePerformanceHandler>,
    rebalance_handler: Arc<RebalancePortfolioHandler>,
}

impl PortfolioHandlers {
    pub fn new(
        allocation_handler: Arc<PlanAllocationHandler>,
        performance_handler: Arc<SimulatePerformanceHandler>,
        rebalance_handler: Arc<RebalancePortfolioHandler>,
    ) -> Self {
        Self {
            allocation_handler,
            performance_handler,
            rebalance_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/portfolio/allocation - Tier-driven allocation plan
pub async fn plan_allocation(
    State(handlers): State<PortfolioHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AllocationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let project_ids = req
        .project_ids
        .map(|ids| ids.iter().map(|id| parse_project_id(id)).collect::<Result<Vec<_>, _>>())
        .transpose()?;
    let query = PlanAllocationQuery {
        user_id: user.id,
        tier: req.tier,
        project_ids,
    };

    let plan = handlers.allocation_handler.handle(query).await?;
    Ok((
        StatusCode::OK,
        Json(AllocationResponse {
            success: true,
            plan,
        }),
    ))
}

/// POST /api/portfolio/performance - Random-walk projection
pub async fn simulate_performance(
    State(handlers): State<PortfolioHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<PerformanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let query = SimulatePerformanceQuery {
        user_id: user.id,
        total_investment: req.total_investment,
        allocations: req.allocations,
        months: req.months,
        seed: req.seed,
    };

    let simulation = handlers.performance_handler.handle(query).await?;
    Ok((
        StatusCode::OK,
        Json(PerformanceResponse {
            success: true,
            simulation,
        }),
    ))
}

/// POST /api/portfolio/rebalance - Moves toward a target mix
pub async fn rebalance(
    State(handlers): State<PortfolioHandlers>,
    RequireAuth(_user): RequireAuth,
    Json(req): Json<RebalanceRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let actions = handlers.rebalance_handler.handle(RebalancePortfolioQuery {
        current: req.current,
        target: req.target,
    })?;
    Ok((
        StatusCode::OK,
        Json(RebalanceResponse {
            success: true,
            balanced: actions.is_empty(),
            actions,
        }),
    ))
}
