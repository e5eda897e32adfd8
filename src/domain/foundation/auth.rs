//! Identity of the caller, as established by a `SessionValidator`.

use super::UserId;
use thiserror::Error;

/// Investor resolved from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Token subject.
    pub id: UserId,
    pub email: String,
    pub display_name: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, email: impl Into<String>, display_name: Option<String>) -> Self {
        Self {
            id,
            email: email.into(),
            display_name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Malformed, badly signed, or issued for another audience.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Could not sign token: {0}")]
    IssuanceFailed(String),

    #[error("Session validation unavailable: {0}")]
    ServiceUnavailable(String),
}
