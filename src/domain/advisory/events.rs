//! Advisory domain events mirrored to the ledger.

use serde::{Deserialize, Serialize};

use super::{RecommendationRecord, SimulationResult};
use crate::domain::foundation::{EventId, Timestamp, UserId};

/// Published after recommendations are generated and stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationsGenerated {
    pub event_id: EventId,
    pub user_id: UserId,
    pub record: RecommendationRecord,
    pub generated_at: Timestamp,
}

crate::domain_event! {
    RecommendationsGenerated {
        kind: "recommendations.generated.v1",
        aggregate: "Investor" => user_id,
        at: generated_at,
    }
}

/// Published after an investment simulation is applied to a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSimulated {
    pub event_id: EventId,
    pub user_id: UserId,
    pub result: SimulationResult,
    pub simulated_at: Timestamp,
}

crate::domain_event! {
    InvestmentSimulated {
        kind: "investment.simulated.v1",
        aggregate: "Investor" => user_id,
        at: simulated_at,
    }
}
