//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `ProjectRepository` - Project documents
//! - `UserRepository` - Investors with their portfolios
//! - `KeyValueStore` - Latest recommendations and cached balances
//!
//! ## Ledger
//!
//! - `LedgerGateway` - Token creation, transfers, balances and topic messages
//! - `EventPublisher` - Mirrors domain events to a ledger topic
//!
//! ## Identity
//!
//! - `SessionValidator` - Bearer token validation
//! - `TokenIssuer` - Token issuance for the built-in identity provider

mod event_publisher;
mod key_value_store;
mod ledger_gateway;
mod project_repository;
mod session_validator;
mod user_repository;

pub use event_publisher::EventPublisher;
pub use key_value_store::{get_typed, set_typed, KeyValueStore};
pub use ledger_gateway::{
    LedgerGateway, MessageReceipt, TokenBalance, TokenReceipt, TokenDefinition, TransferReceipt,
    TransferRequest,
};
pub use project_repository::ProjectRepository;
pub use session_validator::{SessionValidator, TokenIssuer};
pub use user_repository::UserRepository;
