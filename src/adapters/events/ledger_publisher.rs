//! Ledger event publisher - Mirrors envelopes to a consensus topic.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventPublisher, LedgerGateway};

/// Publishes each envelope as one JSON message on a ledger topic.
pub struct LedgerEventPublisher {
    ledger: Arc<dyn LedgerGateway>,
    topic_id: String,
}

impl LedgerEventPublisher {
    pub fn new(ledger: Arc<dyn LedgerGateway>, topic_id: impl Into<String>) -> Self {
        Self {
            ledger,
            topic_id: topic_id.into(),
        }
    }
}

#[async_trait]
impl EventPublisher for LedgerEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let message = event.to_message_bytes().map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to serialize event {}: {}", event.event_id, e),
            )
        })?;

        let receipt = self.ledger.submit_message(&self.topic_id, &message).await?;
        tracing::debug!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            topic_id = %receipt.topic_id,
            sequence_number = receipt.sequence_number,
            "Event mirrored to ledger"
        );
        Ok(())
    }
}
