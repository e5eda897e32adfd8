//! Typed configuration read from `INFRAVEST__<SECTION>__<KEY>` variables.
//!
//! A `.env` file is honoured in development. Only `auth.jwt_secret` is
//! required; `database`, `redis` and a remote `ledger` fall back to the
//! in-memory adapters when left out.

mod advisory;
mod auth;
mod database;
mod error;
mod ledger;
mod redis;
mod server;

pub use advisory::AdvisoryConfig;
pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use ledger::LedgerConfig;
pub use redis::RedisConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

const ENV_PREFIX: &str = "INFRAVEST";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    pub database: Option<DatabaseConfig>,

    pub redis: Option<RedisConfig>,

    pub auth: AuthConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    #[serde(default)]
    pub advisory: AdvisoryConfig,
}

impl AppConfig {
    /// Reads `.env` (if any) and the process environment.
    ///
    /// `INFRAVEST__SERVER__PORT=3000` sets `server.port`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(environment())
    }

    fn from_source(source: config::Environment) -> Result<Self, ConfigError> {
        let config = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    /// Checks every section; section rules may depend on the environment.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let environment = &self.server.environment;
        self.server.validate()?;
        self.database.as_ref().map_or(Ok(()), DatabaseConfig::validate)?;
        self.redis.as_ref().map_or(Ok(()), RedisConfig::validate)?;
        self.auth.validate(environment)?;
        self.ledger.validate(environment)?;
        self.advisory.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR)
}
