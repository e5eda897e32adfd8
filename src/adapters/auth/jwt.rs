//! HS256 JWT adapter for token validation and issuance.
//!
//! Validates bearer tokens signed with a shared secret and, for development
//! setups without an external identity provider, issues them too.
//!
//! # Security
//!
//! Every token is checked for:
//! - **Signature**: HMAC-SHA256 with the configured secret
//! - **Issuer (iss)**: Must match the configured issuer
//! - **Audience (aud)**: Must match the configured audience
//! - **Expiry (exp)**: Must be in the future
//!
//! # Example
//!
//! ```ignore
//! let config = JwtConfig::new(secret, "https://auth.infravest.io", "infravest-api");
//! let adapter = JwtSessionAdapter::new(config);
//! let token = adapter.issue(&user)?;
//! let user = adapter.validate(&token).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, Timestamp, UserId};
use crate::ports::{SessionValidator, TokenIssuer};

/// Configuration for the HS256 adapter.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    secret: Secret<String>,

    /// Expected and issued `iss` claim.
    pub issuer: String,

    /// Expected and issued `aud` claim.
    pub audience: String,

    /// Lifetime of issued tokens.
    pub token_ttl: Duration,

    /// Clock skew tolerated on `exp`.
    pub leeway: Duration,
}

impl JwtConfig {
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            secret: Secret::new(secret.into()),
            issuer: issuer.into(),
            audience: audience.into(),
            token_ttl: Duration::from_secs(3600),
            leeway: Duration::from_secs(30),
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }
}

/// JWT claims carried by access tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject - the user ID
    sub: String,

    iss: String,

    aud: String,

    /// Expiry timestamp (Unix epoch seconds)
    exp: i64,

    /// Issued at timestamp
    iat: i64,

    email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// HS256 session validator and token issuer.
pub struct JwtSessionAdapter {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtSessionAdapter {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.expose_secret().as_bytes();
        let encoding_key = EncodingKey::from_secret(secret);
        let decoding_key = DecodingKey::from_secret(secret);
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.config.audience]);
        validation.validate_exp = true;
        validation.leeway = self.config.leeway.as_secs();
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation
    }

    fn issue_at(&self, user: &AuthenticatedUser, now: Timestamp) -> Result<String, AuthError> {
        let claims = Claims {
            sub: user.id.to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            exp: now.as_unix_secs() + self.config.token_ttl.as_secs() as i64,
            iat: now.as_unix_secs(),
            email: user.email.clone(),
            name: user.display_name.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::IssuanceFailed(e.to_string()))
    }
}

#[async_trait]
impl SessionValidator for JwtSessionAdapter {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation()).map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    ErrorKind::InvalidAudience => {
                        tracing::warn!("Invalid audience in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::warn!("Token validation failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })?;
        let claims = token_data.claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Invalid user ID in token: {}", claims.sub);
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, claims.email, claims.name))
    }
}

impl TokenIssuer for JwtSessionAdapter {
    fn issue(&self, user: &AuthenticatedUser) -> Result<String, AuthError> {
        self.issue_at(user, Timestamp::now())
    }
}

impl std::fmt::Debug for JwtSessionAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionAdapter")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}
