//! UserRepository port for investor persistence.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::Investor;

/// Repository for investors.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an investor by user ID.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<Investor>, DomainError>;

    /// Insert or replace an investor, portfolio included.
    async fn save(&self, investor: &Investor) -> Result<(), DomainError>;
}
