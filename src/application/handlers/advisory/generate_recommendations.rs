//! GenerateRecommendations - Command handler scoring every assessed project.

use std::sync::Arc;

use crate::application::handlers::mirror::mirror_event;
use crate::domain::advisory::{RecommendationGenerator, RecommendationRecord, RecommendationsGenerated};
use crate::domain::foundation::{CommandMetadata, DomainError, EventId, Timestamp, UserId};
use crate::ports::{set_typed, EventPublisher, KeyValueStore, ProjectRepository, UserRepository};

/// Key under which the latest record for a user is stored.
pub fn recommendations_key(user_id: &UserId) -> String {
    format!("recommendations:{}", user_id)
}

/// Command to generate and store recommendations for a user.
#[derive(Debug, Clone)]
pub struct GenerateRecommendationsCommand {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct GenerateRecommendationsResult {
    pub record: RecommendationRecord,
    /// Projects left out because they carry no risk assessment.
    pub skipped_unassessed: usize,
    pub mirror_error: Option<String>,
}

pub struct GenerateRecommendationsHandler {
    users: Arc<dyn UserRepository>,
    projects: Arc<dyn ProjectRepository>,
    store: Arc<dyn KeyValueStore>,
    publisher: Arc<dyn EventPublisher>,
    max_recommendations: usize,
}

impl GenerateRecommendationsHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        projects: Arc<dyn ProjectRepository>,
        store: Arc<dyn KeyValueStore>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            users,
            projects,
            store,
            publisher,
            max_recommendations: 0,
        }
    }

    /// Caps the stored record at `limit` entries; 0 keeps every project.
    pub fn with_max_recommendations(mut self, limit: usize) -> Self {
        self.max_recommendations = limit;
        self
    }

    pub async fn handle(
        &self,
        cmd: GenerateRecommendationsCommand,
        metadata: CommandMetadata,
    ) -> Result<GenerateRecommendationsResult, DomainError> {
        let investor = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&cmd.user_id))?;

        let all_projects = self.projects.list().await?;
        let total = all_projects.len();
        let assessed: Vec<_> = all_projects
            .into_iter()
            .filter(|p| p.risk.is_some())
            .collect();
        let skipped_unassessed = total - assessed.len();
        if skipped_unassessed > 0 {
            tracing::debug!(
                user_id = %cmd.user_id,
                skipped = skipped_unassessed,
                "Skipping projects without risk assessment"
            );
        }

        let now = Timestamp::now();
        let mut record = RecommendationGenerator::generate(&investor, &assessed, now)?;
        if self.max_recommendations > 0 {
            record.projects.truncate(self.max_recommendations);
        }

        set_typed(
            self.store.as_ref(),
            &recommendations_key(&cmd.user_id),
            &record,
            None,
        )
        .await?;

        tracing::info!(
            user_id = %cmd.user_id,
            count = record.projects.len(),
            "Recommendations generated"
        );

        let event = RecommendationsGenerated {
            event_id: EventId::new(),
            user_id: cmd.user_id.clone(),
            record: record.clone(),
            generated_at: now,
        };
        let mirror_error = mirror_event(self.publisher.as_ref(), &event, &metadata).await;

        Ok(GenerateRecommendationsResult {
            record,
            skipped_unassessed,
            mirror_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventPublisher;
    use crate::adapters::storage::{
        InMemoryKeyValueStore, InMemoryProjectRepository, InMemoryUserRepository,
    };
    use crate::application::handlers::mirror::test_support::{investor, metadata, project, user_id};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::project::{Project, RiskLevel};
    use crate::ports::get_typed;

    struct Fixture {
        handler: GenerateRecommendationsHandler,
        store: Arc<InMemoryKeyValueStore>,
        publisher: Arc<InMemoryEventPublisher>,
    }

    async fn fixture(projects: Vec<Project>) -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        users.save(&investor()).await.unwrap();
        let store = Arc::new(InMemoryKeyValueStore::new());
        let publisher = Arc::new(InMemoryEventPublisher::new());
        let handler = GenerateRecommendationsHandler::new(
            users,
            Arc::new(InMemoryProjectRepository::with_projects(projects)),
            store.clone(),
            publisher.clone(),
        );
        Fixture {
            handler,
            store,
            publisher,
        }
    }

    fn cmd() -> GenerateRecommendationsCommand {
        GenerateRecommendationsCommand { user_id: user_id() }
    }

    #[tokio::test]
    async fn stores_sorted_record_and_mirrors_it() {
        let f = fixture(vec![
            project("Wind", "wind farm", RiskLevel::High),
            project("Grid", "power grid", RiskLevel::Medium),
        ])
        .await;

        let result = f.handler.handle(cmd(), metadata()).await.unwrap();

        let scores: Vec<f64> = result
            .record
            .projects
            .iter()
            .map(|p| p.suitability_score)
            .collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(result.mirror_error, None);

        let stored: RecommendationRecord =
            get_typed(f.store.as_ref(), &recommendations_key(&user_id()))
                .await
                .unwrap()
                .unwrap();
        assert_eq!(stored, result.record);
        assert!(f.publisher.has_event("recommendations.generated.v1"));
    }

    #[tokio::test]
    async fn unassessed_projects_are_skipped() {
        let unassessed = Project::new("Bridge", "bridge").unwrap();
        let f = fixture(vec![unassessed, project("Grid", "grid", RiskLevel::Medium)]).await;

        let result = f.handler.handle(cmd(), metadata()).await.unwrap();

        assert_eq!(result.record.projects.len(), 1);
        assert_eq!(result.skipped_unassessed, 1);
    }

    #[tokio::test]
    async fn mirror_failure_keeps_the_record() {
        let f = fixture(vec![project("Grid", "grid", RiskLevel::Medium)]).await;
        f.publisher.set_failing(true);

        let result = f.handler.handle(cmd(), metadata()).await.unwrap();

        assert!(result.mirror_error.is_some());
        assert_eq!(result.record.projects.len(), 1);
        assert!(!f.store.is_empty().await);
    }

    #[tokio::test]
    async fn limit_truncates_record() {
        let f = fixture(vec![
            project("A", "grid", RiskLevel::Medium),
            project("B", "grid", RiskLevel::Medium),
            project("C", "grid", RiskLevel::Medium),
        ])
        .await;
        let handler = f.handler.with_max_recommendations(2);

        let result = handler.handle(cmd(), metadata()).await.unwrap();

        assert_eq!(result.record.projects.len(), 2);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let f = fixture(vec![]).await;
        let err = f
            .handler
            .handle(
                GenerateRecommendationsCommand {
                    user_id: UserId::new("ghost").unwrap(),
                },
                metadata(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::UserNotFound);
    }
}
