//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProjectRepository` - Project documents
//! - `PostgresUserRepository` - Investor documents

mod project_repository;
mod user_repository;

pub use project_repository::PostgresProjectRepository;
pub use user_repository::PostgresUserRepository;

use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Applies the bundled schema migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to run migrations: {}", e),
            )
        })
}
