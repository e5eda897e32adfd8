//! Bearer token ports.
//!
//! Adapters: `JwtSessionAdapter` (HS256) and `MockSessionValidator`.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Resolves a bearer token (without the `Bearer ` prefix) to an investor.
///
/// Expired tokens map to `AuthError::TokenExpired`, every other verification
/// failure to `AuthError::InvalidToken`. `ServiceUnavailable` is reserved for
/// validators that depend on a remote identity service.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

/// Mints tokens that a matching `SessionValidator` accepts.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError>;
}
