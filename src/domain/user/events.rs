//! Domain events for investors.

use serde::{Deserialize, Serialize};

use super::{RiskTolerance, TimeHorizon};
use crate::domain::foundation::{EventId, Timestamp, UserId};

/// Published when an investor completes a risk assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfileUpdated {
    pub event_id: EventId,
    pub user_id: UserId,
    pub tolerance: RiskTolerance,
    pub tolerance_score: f64,
    pub time_horizon: TimeHorizon,
    pub updated_at: Timestamp,
}

crate::domain_event! {
    RiskProfileUpdated {
        kind: "risk_profile.updated.v1",
        aggregate: "Investor" => user_id,
        at: updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainEvent, EventEnvelope};

    #[test]
    fn envelope_targets_investor_aggregate() {
        let event = RiskProfileUpdated {
            event_id: EventId::new(),
            user_id: UserId::new("user-1").unwrap(),
            tolerance: RiskTolerance::Aggressive,
            tolerance_score: 75.0,
            time_horizon: TimeHorizon::Long,
            updated_at: Timestamp::from_unix_secs(5),
        };
        assert_eq!(event.aggregate_id(), "user-1");

        let envelope = EventEnvelope::from_event(&event).unwrap();
        assert_eq!(envelope.aggregate_type, "Investor");
        assert_eq!(envelope.payload["tolerance"], "aggressive");
    }
}
