//! Advisory engine tuning

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::advisory::{DEFAULT_SIMULATION_MONTHS, MAX_SIMULATION_MONTHS};

/// Advisory configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisoryConfig {
    /// Duration used by investment simulations when the request omits one
    #[serde(default = "default_simulation_months")]
    pub default_simulation_months: u32,

    /// Horizon of portfolio performance simulations when the request omits one
    #[serde(default = "default_performance_months")]
    pub default_performance_months: u32,

    /// Lifetime of cached token balances in seconds
    #[serde(default = "default_token_cache_ttl")]
    pub token_cache_ttl_secs: u64,

    /// Cap on stored recommendations (0 keeps all)
    #[serde(default)]
    pub max_recommendations: usize,
}

impl AdvisoryConfig {
    /// Get token cache TTL as Duration
    pub fn token_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.token_cache_ttl_secs)
    }

    /// Validate advisory configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for months in [self.default_simulation_months, self.default_performance_months] {
            if !(1..=MAX_SIMULATION_MONTHS).contains(&months) {
                return Err(ValidationError::InvalidSimulationMonths);
            }
        }
        Ok(())
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            default_simulation_months: default_simulation_months(),
            default_performance_months: default_performance_months(),
            token_cache_ttl_secs: default_token_cache_ttl(),
            max_recommendations: 0,
        }
    }
}

fn default_simulation_months() -> u32 {
    DEFAULT_SIMULATION_MONTHS
}

fn default_performance_months() -> u32 {
    36
}

fn default_token_cache_ttl() -> u64 {
    600
}
