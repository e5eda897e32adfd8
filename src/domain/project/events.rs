//! Domain events for projects.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, ProjectId, Timestamp};

/// Published once the ledger has minted a project's token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTokenCreated {
    pub event_id: EventId,
    pub project_id: ProjectId,
    pub token_id: String,
    pub symbol: String,
    pub total_supply: u64,
    pub created_at: Timestamp,
}

crate::domain_event! {
    ProjectTokenCreated {
        kind: "project.token_created.v1",
        aggregate: "Project" => project_id,
        at: created_at,
    }
}
