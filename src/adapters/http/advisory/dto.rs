//! HTTP DTOs for recommendation and simulation endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::advisory::{
    GenerateRecommendationsResult, SimulateInvestmentResult,
};
use crate::domain::advisory::{RecommendationRecord, SimulationResult};
use crate::domain::foundation::Timestamp;
use crate::domain::portfolio::Portfolio;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to simulate an investment.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulateInvestmentRequest {
    pub project_id: String,
    pub amount: f64,
    /// Months to project; server default when omitted.
    #[serde(default)]
    pub duration: Option<u32>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsResponse {
    pub success: bool,
    pub recommendations: RecommendationRecord,
    pub skipped_unassessed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_error: Option<String>,
}

impl From<GenerateRecommendationsResult> for RecommendationsResponse {
    fn from(result: GenerateRecommendationsResult) -> Self {
        Self {
            success: true,
            recommendations: result.record,
            skipped_unassessed: result.skipped_unassessed,
            mirror_error: result.mirror_error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LatestRecommendationsResponse {
    pub success: bool,
    pub generated_at: Timestamp,
    pub recommendations: RecommendationRecord,
}

impl From<RecommendationRecord> for LatestRecommendationsResponse {
    fn from(record: RecommendationRecord) -> Self {
        Self {
            success: true,
            generated_at: record.timestamp,
            recommendations: record,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResponse {
    pub success: bool,
    pub simulation: SimulationResult,
    pub portfolio: Portfolio,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror_error: Option<String>,
}

impl From<SimulateInvestmentResult> for SimulationResponse {
    fn from(result: SimulateInvestmentResult) -> Self {
        Self {
            success: true,
            simulation: result.simulation,
            portfolio: result.portfolio,
            mirror_error: result.mirror_error,
        }
    }
}
