//! HTTP middleware for axum.
//!
//! - `auth` - Authentication middleware and extractor
//! - `request_id` - Correlation id extractor

pub mod auth;
pub mod request_id;

pub use auth::{auth_middleware, bearer_token, AuthRejection, AuthState, RequireAuth};
pub use request_id::{RequestId, REQUEST_ID_HEADER};
