//! PostgreSQL implementation of ProjectRepository.
//!
//! Projects are stored as JSONB documents keyed by id.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, ProjectId};
use crate::domain::project::Project;
use crate::ports::ProjectRepository;

/// PostgreSQL implementation of ProjectRepository.
#[derive(Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new PostgresProjectRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DomainError> {
        let row = sqlx::query("SELECT document FROM projects WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch project: {}", e),
                )
            })?;

        match row {
            Some(row) => Ok(Some(row_to_project(row)?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Project>, DomainError> {
        let rows = sqlx::query("SELECT document FROM projects ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to list projects: {}", e),
                )
            })?;

        rows.into_iter().map(row_to_project).collect()
    }

    async fn save(&self, project: &Project) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO projects (id, name, document, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                document = EXCLUDED.document,
                updated_at = NOW()
            "#,
        )
        .bind(project.id.as_uuid())
        .bind(&project.name)
        .bind(Json(project))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save project: {}", e),
            )
        })?;

        Ok(())
    }
}

fn row_to_project(row: sqlx::postgres::PgRow) -> Result<Project, DomainError> {
    let Json(project): Json<Project> = row.try_get("document").map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to decode project document: {}", e),
        )
    })?;
    Ok(project)
}
