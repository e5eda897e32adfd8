//! Ledger mirroring shared by the command handlers.
//!
//! A mirror failure never discards the computed result. It is logged and
//! reported back to the caller as `mirror_error`.

use serde::Serialize;

use crate::domain::foundation::{CommandMetadata, DomainEvent, EventEnvelope};
use crate::ports::EventPublisher;

/// Publishes `event` and returns the failure message, if any.
pub(crate) async fn mirror_event<E>(
    publisher: &dyn EventPublisher,
    event: &E,
    metadata: &CommandMetadata,
) -> Option<String>
where
    E: DomainEvent + Serialize,
{
    let envelope = match EventEnvelope::from_event(event) {
        Ok(envelope) => envelope
            .with_correlation_id(metadata.correlation_id())
            .with_user_id(metadata.user_id.to_string()),
        Err(e) => {
            tracing::error!(event_type = event.event_type(), "Failed to encode event: {}", e);
            return Some(e.to_string());
        }
    };

    match publisher.publish(envelope).await {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!(
                event_type = event.event_type(),
                aggregate_id = %event.aggregate_id(),
                "Ledger mirror failed: {}",
                e
            );
            Some(e.message().to_string())
        }
    }
}
