//! Project domain - infrastructure projects, their risk and their tokens.

mod category;
mod events;
mod project;
mod risk;
mod tokenomics;

pub use category::{ProjectCategory, SdgGoal};
pub use events::ProjectTokenCreated;
pub use project::{
    Financials, InvestmentMetrics, Project, ProjectPhase, RegulatoryComplexity,
};
pub use risk::{
    ProjectRisk, RiskCategory, RiskLevel, RiskLevels, ENVIRONMENTAL_WEIGHT, EXECUTION_WEIGHT,
    MARKET_WEIGHT, POLITICAL_WEIGHT, REGULATORY_WEIGHT,
};
pub use tokenomics::{
    TokenAllocation, Tokenomics, TokenomicsError, UnlockPoint, VestingSchedule,
};
