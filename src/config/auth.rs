//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (HS256 session tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing secret
    pub jwt_secret: Secret<String>,

    /// `iss` claim issued and expected
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// `aud` claim issued and expected
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Lifetime of issued tokens in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
}

impl AuthConfig {
    /// Get token TTL as Duration
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// Production requires a signing secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("INFRAVEST__AUTH__JWT_SECRET"));
        }
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("INFRAVEST__AUTH__ISSUER"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("INFRAVEST__AUTH__AUDIENCE"));
        }
        if !(60..=86_400).contains(&self.token_ttl_secs) {
            return Err(ValidationError::InvalidTokenTtl);
        }

        if *environment == Environment::Production && secret.len() < 32 {
            return Err(ValidationError::WeakSigningSecret);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Secret::new(String::new()),
            issuer: default_issuer(),
            audience: default_audience(),
            token_ttl_secs: default_token_ttl(),
        }
    }
}

fn default_issuer() -> String {
    "infravest".to_string()
}

fn default_audience() -> String {
    "infravest-api".to_string()
}

fn default_token_ttl() -> u64 {
    3600
}
