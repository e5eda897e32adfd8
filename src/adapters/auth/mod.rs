//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` and `TokenIssuer` ports:
//!
//! - `jwt` - HS256 tokens signed with a shared secret
//! - `mock` - Test implementation that doesn't require signed tokens

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtSessionAdapter};
pub use mock::MockSessionValidator;
