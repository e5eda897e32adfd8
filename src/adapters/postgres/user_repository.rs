//! PostgreSQL implementation of UserRepository.
//!
//! Investors, portfolio included, are stored as JSONB documents.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::Investor;
use crate::ports::UserRepository;

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Investor>, DomainError> {
        let row = sqlx::query("SELECT document FROM investors WHERE id = $1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Failed to fetch investor: {}", e),
                )
            })?;

        match row {
            Some(row) => {
                let Json(investor): Json<Investor> = row.try_get("document").map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to decode investor document: {}", e),
                    )
                })?;
                Ok(Some(investor))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, investor: &Investor) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO investors (id, email, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                email = EXCLUDED.email,
                document = EXCLUDED.document,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(investor.id.as_str())
        .bind(&investor.email)
        .bind(Json(investor))
        .bind(investor.created_at.as_datetime())
        .bind(investor.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to save investor: {}", e),
            )
        })?;

        Ok(())
    }
}
