//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid host/port combination")]
    InvalidSocketAddr,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Signing secret must be at least 32 bytes in production")]
    WeakSigningSecret,

    #[error("Token TTL must be between 60 and 86400 seconds")]
    InvalidTokenTtl,

    #[error("Ledger URL must use HTTPS in production")]
    LedgerMustBeHttps,

    #[error("Invalid ledger URL format")]
    InvalidLedgerUrl,

    #[error("Ledger retries exceed maximum allowed (10)")]
    TooManyRetries,

    #[error("Simulation months must be between 1 and 600")]
    InvalidSimulationMonths,
}
