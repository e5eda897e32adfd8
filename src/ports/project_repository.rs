//! ProjectRepository port for project persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProjectId};
use crate::domain::project::Project;

/// Repository for infrastructure projects.
///
/// Implementations store the whole `Project` document; the advisory
/// engines assume whatever they load here is already schema-valid.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find a project by ID.
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError>;

    /// All projects, oldest first.
    async fn list(&self) -> Result<Vec<Project>, DomainError>;

    /// Insert or replace a project.
    async fn save(&self, project: &Project) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ProjectRepository) {}

    #[test]
    fn project_repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ProjectRepository>();
    }
}
