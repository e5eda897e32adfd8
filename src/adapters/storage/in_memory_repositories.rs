//! In-Memory Repository Adapters
//!
//! Keep projects and investors in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ProjectId, UserId};
use crate::domain::project::Project;
use crate::domain::user::Investor;
use crate::ports::{ProjectRepository, UserRepository};

/// In-memory project store. Listing keeps insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    projects: Arc<RwLock<Vec<Project>>>,
}

impl InMemoryProjectRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with projects
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Arc::new(RwLock::new(projects)),
        }
    }

    /// Get the number of stored projects
    pub async fn count(&self) -> usize {
        self.projects.read().await.len()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let projects = self.projects.read().await;
        Ok(projects.iter().find(|p| &p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Project>, DomainError> {
        Ok(self.projects.read().await.clone())
    }

    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        let mut projects = self.projects.write().await;
        match projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project.clone(),
            None => projects.push(project.clone()),
        }
        Ok(())
    }
}

/// In-memory investor store
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    investors: Arc<RwLock<HashMap<UserId, Investor>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored investors
    pub async fn count(&self) -> usize {
        self.investors.read().await.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Investor>, DomainError> {
        Ok(self.investors.read().await.get(id).cloned())
    }

    async fn save(&self, investor: &Investor) -> Result<(), DomainError> {
        self.investors
            .write()
            .await
            .insert(investor.id.clone(), investor.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn save_replaces_existing_project() {
        let repo = InMemoryProjectRepository::new();
        let project = Project::new("Bridge", "bridge").unwrap();
        repo.save(&project).await.unwrap();

        let renamed = Project {
            name: "Bridge II".to_string(),
            ..project.clone()
        };
        repo.save(&renamed).await.unwrap();

        assert_eq!(repo.count().await, 1);
        let found = repo.find_by_id(&project.id).await.unwrap().unwrap();
        assert_eq!(found.name, "Bridge II");
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let a = Project::new("A", "solar").unwrap();
        let b = Project::new("B", "water").unwrap();
        let repo = InMemoryProjectRepository::with_projects(vec![a.clone(), b.clone()]);
        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn missing_project_is_none() {
        let repo = InMemoryProjectRepository::new();
        assert!(repo.find_by_id(&ProjectId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn investor_round_trip() {
        let repo = InMemoryUserRepository::new();
        let investor = Investor::register(
            UserId::new("u1").unwrap(),
            "u1@example.com",
            None,
            Timestamp::from_unix_secs(0),
        )
        .unwrap();
        repo.save(&investor).await.unwrap();
        assert_eq!(
            repo.find_by_id(&investor.id).await.unwrap(),
            Some(investor.clone())
        );
        assert_eq!(repo.count().await, 1);
    }
}
