//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write and mirror; query handlers only read.

pub mod handlers;

pub use handlers::advisory::{
    GenerateRecommendationsCommand, GenerateRecommendationsHandler, GetLatestRecommendationsHandler,
    GetProjectSuitabilityHandler, SimulateInvestmentCommand, SimulateInvestmentHandler,
};
pub use handlers::investor::{
    GetInvestorHandler, RecordKnowledgeScoreHandler, RegisterInvestorHandler,
    UpdateRiskProfileHandler,
};
pub use handlers::portfolio::{
    PlanAllocationHandler, RebalancePortfolioHandler, SimulatePerformanceHandler,
};
pub use handlers::project::{
    CreateProjectTokenHandler, GetTokenBalanceHandler, InvestInProjectHandler,
};
