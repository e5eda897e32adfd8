//! Ledger gateway configuration

use secrecy::Secret;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Ledger configuration
///
/// Without a `base_url` the service runs against an in-memory ledger.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// REST gateway of the consensus service
    pub base_url: Option<String>,

    /// Operator account paying for transactions
    #[serde(default)]
    pub operator_id: String,

    /// Operator API key, used to sign requests
    pub api_key: Option<Secret<String>>,

    /// Topic receiving mirrored domain events
    #[serde(default = "default_topic_id")]
    pub topic_id: String,

    /// Account holding newly minted project tokens
    #[serde(default = "default_treasury_account")]
    pub treasury_account: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl LedgerConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether a remote gateway is configured
    pub fn is_remote(&self) -> bool {
        self.base_url.is_some()
    }

    /// Validate ledger configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.topic_id.is_empty() {
            return Err(ValidationError::MissingRequired("INFRAVEST__LEDGER__TOPIC_ID"));
        }
        if self.treasury_account.is_empty() {
            return Err(ValidationError::MissingRequired(
                "INFRAVEST__LEDGER__TREASURY_ACCOUNT",
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > 10 {
            return Err(ValidationError::TooManyRetries);
        }

        let Some(url) = &self.base_url else {
            return Ok(());
        };
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidLedgerUrl);
        }
        if *environment == Environment::Production && !url.starts_with("https://") {
            return Err(ValidationError::LedgerMustBeHttps);
        }
        if self.operator_id.is_empty() {
            return Err(ValidationError::MissingRequired("INFRAVEST__LEDGER__OPERATOR_ID"));
        }
        if self.api_key.is_none() {
            return Err(ValidationError::MissingRequired("INFRAVEST__LEDGER__API_KEY"));
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            operator_id: String::new(),
            api_key: None,
            topic_id: default_topic_id(),
            treasury_account: default_treasury_account(),
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
        }
    }
}

fn default_topic_id() -> String {
    "infravest-events".to_string()
}

fn default_treasury_account() -> String {
    "treasury".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(url: &str) -> LedgerConfig {
        LedgerConfig {
            base_url: Some(url.to_string()),
            operator_id: "0.0.1001".to_string(),
            api_key: Some(Secret::new("key".to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ledger_config_defaults() {
        let config = LedgerConfig::default();
        assert!(!config.is_remote());
        assert_eq!(config.topic_id, "infravest-events");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_validation_remote_requires_credentials() {
        let mut config = remote("https://ledger.example.com");
        assert!(config.validate(&Environment::Production).is_ok());

        config.api_key = None;
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("INFRAVEST__LEDGER__API_KEY"))
        );
    }

    #[test]
    fn test_validation_production_requires_https() {
        let config = remote("http://ledger.local");
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::LedgerMustBeHttps)
        );
    }

    #[test]
    fn test_validation_invalid_url() {
        let config = remote("ftp://ledger.local");
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidLedgerUrl)
        );
    }

    #[test]
    fn test_validation_retry_limit() {
        let config = LedgerConfig {
            max_retries: 11,
            ..Default::default()
        };
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::TooManyRetries)
        );
    }
}
