//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, error types, command metadata and the
//! event envelope used to mirror facts to the ledger.

mod auth;
mod command;
mod errors;
mod events;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata};
pub use ids::{ProjectId, UserId};
pub use timestamp::Timestamp;
