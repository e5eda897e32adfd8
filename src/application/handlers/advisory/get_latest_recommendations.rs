//! GetLatestRecommendations - Query handler for the last stored record.

use std::sync::Arc;

use super::generate_recommendations::recommendations_key;
use crate::domain::advisory::RecommendationRecord;
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{get_typed, KeyValueStore};

#[derive(Debug, Clone)]
pub struct GetLatestRecommendationsQuery {
    pub user_id: UserId,
}

pub struct GetLatestRecommendationsHandler {
    store: Arc<dyn KeyValueStore>,
}

impl GetLatestRecommendationsHandler {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns `None` when nothing has been generated for the user yet.
    pub async fn handle(
        &self,
        query: GetLatestRecommendationsQuery,
    ) -> Result<Option<RecommendationRecord>, DomainError> {
        get_typed(self.store.as_ref(), &recommendations_key(&query.user_id)).await
    }
}
