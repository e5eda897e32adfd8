//! GetProjectSuitability - Query handler for one project's score and advice.

use std::sync::Arc;

use crate::domain::advisory::{
    RecommendationGenerator, RiskMatch, RiskScorer, SuitabilityEngine, SuitabilityResult,
};
use crate::domain::foundation::{DomainError, ProjectId, UserId};
use crate::domain::project::RiskCategory;
use crate::ports::{ProjectRepository, UserRepository};

#[derive(Debug, Clone)]
pub struct GetProjectSuitabilityQuery {
    pub user_id: UserId,
    pub project_id: ProjectId,
}

#[derive(Debug, Clone)]
pub struct ProjectSuitabilityView {
    pub project_id: ProjectId,
    pub suitability: SuitabilityResult,
    pub risk_match: RiskMatch,
    pub risk_category: RiskCategory,
    pub advice: Vec<String>,
}

pub struct GetProjectSuitabilityHandler {
    users: Arc<dyn UserRepository>,
    projects: Arc<dyn ProjectRepository>,
}

impl GetProjectSuitabilityHandler {
    pub fn new(users: Arc<dyn UserRepository>, projects: Arc<dyn ProjectRepository>) -> Self {
        Self { users, projects }
    }

    pub async fn handle(
        &self,
        query: GetProjectSuitabilityQuery,
    ) -> Result<ProjectSuitabilityView, DomainError> {
        let investor = self
            .users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&query.user_id))?;
        let project = self
            .projects
            .find_by_id(&query.project_id)
            .await?
            .ok_or_else(|| DomainError::project_not_found(query.project_id))?;

        let suitability = SuitabilityEngine::score(&investor, &project)?;
        let risk_match = RiskScorer::match_risk(
            investor.risk_profile.effective_tolerance_score(),
            RiskScorer::project_risk_score(&project),
        );

        Ok(ProjectSuitabilityView {
            project_id: project.id,
            suitability,
            risk_match,
            risk_category: RiskScorer::classify_project_risk(&project),
            advice: RecommendationGenerator::personalized_recommendations(&investor, &project),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemoryProjectRepository, InMemoryUserRepository};
    use crate::application::handlers::mirror::test_support::{investor, project, user_id};
    use crate::domain::advisory::MatchLevel;
    use crate::domain::foundation::ErrorCode;
    use crate::domain::project::{Project, RiskLevel};

    async fn handler(projects: Vec<Project>) -> GetProjectSuitabilityHandler {
        let users = Arc::new(InMemoryUserRepository::new());
        users.save(&investor()).await.unwrap();
        GetProjectSuitabilityHandler::new(
            users,
            Arc::new(InMemoryProjectRepository::with_projects(projects)),
        )
    }

    #[tokio::test]
    async fn scores_assessed_project() {
        let medium = project("Grid", "power grid", RiskLevel::Medium);
        let id = medium.id;
        let handler = handler(vec![medium]).await;

        let view = handler
            .handle(GetProjectSuitabilityQuery {
                user_id: user_id(),
                project_id: id,
            })
            .await
            .unwrap();

        assert_eq!(view.project_id, id);
        assert_eq!(view.risk_match.match_level, MatchLevel::Excellent);
        assert_eq!(view.risk_category, RiskCategory::MediumRisk);
        assert!(view.suitability.score >= 0.0 && view.suitability.score <= 100.0);
    }

    #[tokio::test]
    async fn unassessed_project_is_rejected() {
        let bare = Project::new("Bridge", "bridge").unwrap();
        let id = bare.id;
        let handler = handler(vec![bare]).await;

        let err = handler
            .handle(GetProjectSuitabilityQuery {
                user_id: user_id(),
                project_id: id,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRiskAssessment);
    }

    #[tokio::test]
    async fn unknown_project_is_not_found() {
        let handler = handler(vec![]).await;
        let err = handler
            .handle(GetProjectSuitabilityQuery {
                user_id: user_id(),
                project_id: ProjectId::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProjectNotFound);
    }
}
