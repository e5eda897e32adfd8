//! Investor application handlers.
//!
//! Registration, profile reads, risk assessments and knowledge scores.

mod get_investor;
mod record_knowledge_score;
mod register_investor;
mod update_risk_profile;

pub use get_investor::{GetInvestorHandler, GetInvestorQuery};
pub use record_knowledge_score::{RecordKnowledgeScoreCommand, RecordKnowledgeScoreHandler};
pub use register_investor::{RegisterInvestorCommand, RegisterInvestorHandler};
pub use update_risk_profile::{
    UpdateRiskProfileCommand, UpdateRiskProfileHandler, UpdateRiskProfileResult,
};
