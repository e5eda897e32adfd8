//! HTTP adapter for profile endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    InvestorResponse, KnowledgeScoreRequest, RegisterRequest, RiskProfileResponse,
    UpdateRiskProfileRequest,
};
pub use handlers::ProfileHandlers;
pub use routes::profile_routes;
