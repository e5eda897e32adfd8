//! Event adapters - Implementations of `EventPublisher`.
//!
//! - `LedgerEventPublisher` - Submits envelopes to a ledger topic
//! - `InMemoryEventPublisher` - Captures envelopes for tests

mod in_memory;
mod ledger_publisher;

pub use in_memory::InMemoryEventPublisher;
pub use ledger_publisher::LedgerEventPublisher;
