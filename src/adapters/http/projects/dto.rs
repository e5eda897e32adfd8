//! HTTP DTOs for project endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::advisory::ProjectSuitabilityView;
use crate::application::handlers::project::{CreateProjectTokenResult, InvestInProjectResult};
use crate::domain::advisory::{MatchLevel, RiskAlignment, SuitabilityFactor, SuitabilityLabel};
use crate::domain::portfolio::Portfolio;
use crate::domain::project::RiskCategory;
use crate::ports::TokenBalance;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BalanceParams {
    /// Ledger account; the caller's user id when omitted.
    #[serde(default)]
    pub account_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvestRequest {
    pub amount: f64,
    pub account_id: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct SuitabilityResponse {
    pub success: bool,
    pub project_id: String,
    pub suitability_score: f64,
    pub recommendation: SuitabilityLabel,
    pub factors: Vec<SuitabilityFactor>,
    pub risk_match: MatchLevel,
    pub risk_assessment: RiskAlignment,
    pub risk_category: RiskCategory,
    pub personalized_recommendations: Vec<String>,
}

impl From<ProjectSuitabilityView> for SuitabilityResponse {
    fn from(view: ProjectSuitabilityView) -> Self {
        Self {
            success: true,
            project_id: view.project_id.to_string(),
            suitability_score: view.suitability.score,
            recommendation: view.suitability.recommendation,
            factors: view.suitability.factors,
            risk_match: view.risk_match.match_level,
            risk_assessment: view.risk_match.risk_assessment,
            risk_category: view.risk_category,
            personalized_recommendations: view.advice,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TokenCreatedResponse {
    pub success: bool,
    pub project_id: String,
    pub token_id: String,
    pub transaction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_error: Option<String>,
}

impl From<CreateProjectTokenResult> for TokenCreatedResponse {
    fn from(result: CreateProjectTokenResult) -> Self {
        Self {
            success: true,
            project_id: result.project.id.to_string(),
            token_id: result.token_id,
            transaction_id: result.transaction_id,
            mirror_error: result.mirror_error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BalanceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub balance: TokenBalance,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestResponse {
    pub success: bool,
    pub transaction_id: String,
    pub status: String,
    pub units: f64,
    pub portfolio: Portfolio,
}

impl From<InvestInProjectResult> for InvestResponse {
    fn from(result: InvestInProjectResult) -> Self {
        Self {
            success: true,
            transaction_id: result.transfer.transaction_id,
            status: result.transfer.status,
            units: result.units,
            portfolio: result.portfolio,
        }
    }
}
