//! User domain - investors and their risk profiles.

mod events;
mod investor;
mod risk_profile;

pub use events::RiskProfileUpdated;
pub use investor::Investor;
pub use risk_profile::{RiskAssessment, RiskTolerance, TimeHorizon, UserRiskProfile};
