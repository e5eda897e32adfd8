//! Ledger adapters - Implementations of `LedgerGateway`.
//!
//! - `HttpLedgerGateway` - REST client for the consensus service
//! - `InMemoryLedger` - Local ledger for tests and development

mod http_gateway;
mod in_memory;

pub use http_gateway::{HttpLedgerConfig, HttpLedgerGateway};
pub use in_memory::InMemoryLedger;
