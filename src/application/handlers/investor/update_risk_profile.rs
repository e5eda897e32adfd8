//! UpdateRiskProfile - Command handler applying a risk assessment.

use std::sync::Arc;

use crate::application::handlers::mirror::mirror_event;
use crate::domain::foundation::{CommandMetadata, DomainError, EventId, Timestamp, UserId};
use crate::domain::user::{RiskAssessment, RiskProfileUpdated, UserRiskProfile};
use crate::ports::{EventPublisher, UserRepository};

#[derive(Debug, Clone)]
pub struct UpdateRiskProfileCommand {
    pub user_id: UserId,
    pub assessment: RiskAssessment,
}

#[derive(Debug, Clone)]
pub struct UpdateRiskProfileResult {
    pub profile: UserRiskProfile,
    pub mirror_error: Option<String>,
}

pub struct UpdateRiskProfileHandler {
    users: Arc<dyn UserRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl UpdateRiskProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { users, publisher }
    }

    pub async fn handle(
        &self,
        cmd: UpdateRiskProfileCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateRiskProfileResult, DomainError> {
        let investor = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&cmd.user_id))?;

        let now = Timestamp::now();
        let profile = investor.risk_profile.assessed(cmd.assessment, now)?;
        let investor = investor.with_risk_profile(profile.clone(), now);
        self.users.save(&investor).await?;

        tracing::info!(
            user_id = %cmd.user_id,
            tolerance = %profile.tolerance,
            "Risk profile updated"
        );

        let event = RiskProfileUpdated {
            event_id: EventId::new(),
            user_id: cmd.user_id.clone(),
            tolerance: profile.tolerance,
            tolerance_score: profile.effective_tolerance_score(),
            time_horizon: profile.time_horizon,
            updated_at: now,
        };
        let mirror_error = mirror_event(self.publisher.as_ref(), &event, &metadata).await;

        Ok(UpdateRiskProfileResult {
            profile,
            mirror_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventPublisher;
    use crate::adapters::storage::InMemoryUserRepository;
    use crate::application::handlers::mirror::test_support::{investor, metadata, user_id};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::user::{RiskTolerance, TimeHorizon};
    use std::collections::BTreeSet;

    async fn setup() -> (
        UpdateRiskProfileHandler,
        Arc<InMemoryUserRepository>,
        Arc<InMemoryEventPublisher>,
    ) {
        let users = Arc::new(InMemoryUserRepository::new());
        users.save(&investor()).await.unwrap();
        let publisher = Arc::new(InMemoryEventPublisher::new());
        (
            UpdateRiskProfileHandler::new(users.clone(), publisher.clone()),
            users,
            publisher,
        )
    }

    fn cmd(tolerance: RiskTolerance) -> UpdateRiskProfileCommand {
        UpdateRiskProfileCommand {
            user_id: user_id(),
            assessment: RiskAssessment {
                tolerance,
                investment_goals: Some(BTreeSet::from(["solar".to_string()])),
                time_horizon: Some(TimeHorizon::Long),
                max_investment_per_project: Some(2_500.0),
            },
        }
    }

    #[tokio::test]
    async fn stamps_assessment_score_and_saves() {
        let (handler, users, publisher) = setup().await;

        let result = handler
            .handle(cmd(RiskTolerance::Aggressive), metadata())
            .await
            .unwrap();

        assert_eq!(result.profile.tolerance_score, Some(75.0));
        assert!(result.profile.last_assessment_date.is_some());
        assert_eq!(result.mirror_error, None);

        let saved = users.find_by_id(&user_id()).await.unwrap().unwrap();
        assert_eq!(saved.risk_profile, result.profile);
        assert_eq!(saved.risk_profile.max_investment_per_project, 2_500.0);

        let events = publisher.events_of_type("risk_profile.updated.v1");
        assert_eq!(events.len(), 1);
        let payload: RiskProfileUpdated = events[0].payload_as().unwrap();
        assert_eq!(payload.tolerance_score, 75.0);
    }

    #[tokio::test]
    async fn negative_cap_is_rejected() {
        let (handler, _, publisher) = setup().await;
        let mut bad = cmd(RiskTolerance::Moderate);
        bad.assessment.max_investment_per_project = Some(-1.0);

        let err = handler.handle(bad, metadata()).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(publisher.event_count(), 0);
    }

    #[tokio::test]
    async fn mirror_failure_still_saves_profile() {
        let (handler, users, publisher) = setup().await;
        publisher.set_failing(true);

        let result = handler
            .handle(cmd(RiskTolerance::Conservative), metadata())
            .await
            .unwrap();

        assert!(result.mirror_error.is_some());
        let saved = users.find_by_id(&user_id()).await.unwrap().unwrap();
        assert_eq!(saved.risk_profile.tolerance_score, Some(25.0));
    }
}
