//! HTTP DTOs for portfolio planning endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::advisory::{
    AllocationTier, PerformanceSimulation, PortfolioAllocationPlan, RebalanceAction,
    TargetAllocation,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AllocationRequest {
    /// Profile tolerance decides when omitted.
    #[serde(default)]
    pub tier: Option<AllocationTier>,
    /// Every listed project when omitted.
    #[serde(default)]
    pub project_ids: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceRequest {
    pub total_investment: f64,
    pub allocations: Vec<TargetAllocation>,
    #[serde(default)]
    pub months: Option<u32>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RebalanceRequest {
    pub current: Vec<TargetAllocation>,
    pub target: Vec<TargetAllocation>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct AllocationResponse {
    pub success: bool,
    #[serde(flatten)]
    pub plan: PortfolioAllocationPlan,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceResponse {
    pub success: bool,
    #[serde(flatten)]
    pub simulation: PerformanceSimulation,
}

#[derive(Debug, Clone, Serialize)]
pub struct RebalanceResponse {
    pub success: bool,
    pub actions: Vec<RebalanceAction>,
    pub balanced: bool,
}
