//! GetInvestor - Query handler for the caller's investor record.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::Investor;
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct GetInvestorQuery {
    pub user_id: UserId,
}

pub struct GetInvestorHandler {
    users: Arc<dyn UserRepository>,
}

impl GetInvestorHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetInvestorQuery) -> Result<Investor, DomainError> {
        self.users
            .find_by_id(&query.user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&query.user_id))
    }
}
