//! KeyValueStore port - Small shared caches keyed by string.
//!
//! Holds the latest recommendation record per investor and cached token
//! balances. Values are JSON so any serde type can be stored.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Port for a key-value store with optional expiry.
///
/// # Contract
///
/// - `set` replaces any existing value atomically (last write wins)
/// - An expired key reads as absent
/// - `evict` on a missing key succeeds
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, DomainError>;

    /// Store `value`; `ttl` of `None` keeps it until replaced or evicted.
    async fn set(
        &self,
        key: &str,
        value: JsonValue,
        ttl: Option<Duration>,
    ) -> Result<(), DomainError>;

    async fn evict(&self, key: &str) -> Result<(), DomainError>;
}

/// Reads and deserializes a value.
pub async fn get_typed<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, DomainError> {
    match store.get(key).await? {
        Some(value) => serde_json::from_value(value).map(Some).map_err(|e| {
            DomainError::new(
                ErrorCode::CacheError,
                format!("Failed to decode cached value for {}: {}", key, e),
            )
        }),
        None => Ok(None),
    }
}

/// Serializes and stores a value.
pub async fn set_typed<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
) -> Result<(), DomainError> {
    let json = serde_json::to_value(value).map_err(|e| {
        DomainError::new(
            ErrorCode::CacheError,
            format!("Failed to encode value for {}: {}", key, e),
        )
    })?;
    store.set(key, json, ttl).await
}
