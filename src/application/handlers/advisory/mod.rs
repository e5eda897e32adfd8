//! Advisory application handlers.
//!
//! Recommendations, single-project suitability and investment simulation.

mod generate_recommendations;
mod get_latest_recommendations;
mod get_project_suitability;
mod simulate_investment;

pub use generate_recommendations::{
    recommendations_key, GenerateRecommendationsCommand, GenerateRecommendationsHandler,
    GenerateRecommendationsResult,
};
pub use get_latest_recommendations::{
    GetLatestRecommendationsHandler, GetLatestRecommendationsQuery,
};
pub use get_project_suitability::{
    GetProjectSuitabilityHandler, GetProjectSuitabilityQuery, ProjectSuitabilityView,
};
pub use simulate_investment::{
    SimulateInvestmentCommand, SimulateInvestmentHandler, SimulateInvestmentResult,
};
