//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - HS256 session tokens and a test validator
//! - `events` - Event mirroring (ledger topic, in-memory capture)
//! - `http` - axum REST API
//! - `ledger` - Ledger gateway (REST client, in-memory)
//! - `postgres` - Repository implementations over PostgreSQL
//! - `storage` - In-memory repositories, key-value stores (memory, Redis)

pub mod auth;
pub mod events;
pub mod http;
pub mod ledger;
pub mod postgres;
pub mod storage;

pub use events::{InMemoryEventPublisher, LedgerEventPublisher};
pub use ledger::{HttpLedgerConfig, HttpLedgerGateway, InMemoryLedger};
