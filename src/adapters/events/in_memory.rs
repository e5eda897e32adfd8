//! Recording event publisher used by handler and HTTP tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::EventPublisher;

/// Keeps every envelope it is handed, in publish order.
///
/// `set_failing(true)` simulates an unreachable ledger; rejected envelopes
/// are not recorded.
#[derive(Debug, Default)]
pub struct InMemoryEventPublisher {
    log: Mutex<Vec<EventEnvelope>>,
    failing: AtomicBool,
}

impl InMemoryEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// A panicking test thread must not hide what was already recorded.
    fn log(&self) -> MutexGuard<'_, Vec<EventEnvelope>> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of everything published so far.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.log().clone()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.log()
            .iter()
            .filter(|e| e.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn has_event(&self, event_type: &str) -> bool {
        self.log()
            .iter()
            .any(|e| e.event_type == event_type)
    }

    pub fn event_count(&self) -> usize {
        self.log().len()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::LedgerError,
                format!("Ledger topic unreachable, dropped {}", event.event_type),
            ));
        }
        self.log().push(event);
        Ok(())
    }
}
