//! RecordKnowledgeScore - Command handler storing a topic quiz result.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DomainError, Timestamp, UserId};
use crate::ports::UserRepository;

#[derive(Debug, Clone)]
pub struct RecordKnowledgeScoreCommand {
    pub user_id: UserId,
    /// Topic key, matched against project category names.
    pub topic: String,
    pub score: f64,
}

pub struct RecordKnowledgeScoreHandler {
    users: Arc<dyn UserRepository>,
}

impl RecordKnowledgeScoreHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: RecordKnowledgeScoreCommand,
        _metadata: CommandMetadata,
    ) -> Result<(), DomainError> {
        if cmd.topic.trim().is_empty() {
            return Err(DomainError::validation("topic", "Topic cannot be empty"));
        }

        let mut investor = self
            .users
            .find_by_id(&cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(&cmd.user_id))?
            .with_knowledge_score(cmd.topic.trim().to_lowercase(), cmd.score)?;
        investor.updated_at = Timestamp::now();
        self.users.save(&investor).await?;

        tracing::debug!(user_id = %cmd.user_id, topic = %cmd.topic, "Knowledge score recorded");
        Ok(())
    }
}
