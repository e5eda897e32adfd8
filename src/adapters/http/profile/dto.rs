//! HTTP DTOs for profile endpoints.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::application::handlers::investor::UpdateRiskProfileResult;
use crate::domain::foundation::Timestamp;
use crate::domain::portfolio::Portfolio;
use crate::domain::user::{Investor, RiskAssessment, RiskTolerance, TimeHorizon, UserRiskProfile};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Registration request; identity comes from the token.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    /// Overrides the token's display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Risk questionnaire answers.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRiskProfileRequest {
    pub risk_tolerance: RiskTolerance,
    #[serde(default)]
    pub investment_goals: Option<BTreeSet<String>>,
    #[serde(default)]
    pub time_horizon: Option<TimeHorizon>,
    #[serde(default)]
    pub max_investment_per_project: Option<f64>,
}

impl From<UpdateRiskProfileRequest> for RiskAssessment {
    fn from(req: UpdateRiskProfileRequest) -> Self {
        RiskAssessment {
            tolerance: req.risk_tolerance,
            investment_goals: req.investment_goals,
            time_horizon: req.time_horizon,
            max_investment_per_project: req.max_investment_per_project,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeScoreRequest {
    pub topic: String,
    pub score: f64,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct InvestorResponse {
    pub success: bool,
    pub user_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub risk_profile: UserRiskProfile,
    pub knowledge_scores: BTreeMap<String, f64>,
    pub portfolio: Portfolio,
    pub created_at: Timestamp,
}

impl From<Investor> for InvestorResponse {
    fn from(investor: Investor) -> Self {
        Self {
            success: true,
            user_id: investor.id.to_string(),
            email: investor.email,
            display_name: investor.display_name,
            risk_profile: investor.risk_profile,
            knowledge_scores: investor.knowledge_scores,
            portfolio: investor.portfolio,
            created_at: investor.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskProfileResponse {
    pub success: bool,
    pub risk_profile: UserRiskProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_error: Option<String>,
}

impl From<UpdateRiskProfileResult> for RiskProfileResponse {
    fn from(result: UpdateRiskProfileResult) -> Self {
        Self {
            success: true,
            risk_profile: result.profile,
            mirror_error: result.mirror_error,
        }
    }
}
