//! Redis-backed key-value store for multi-server deployments.
//!
//! Values are stored as JSON strings. `SET` and `SET EX` replace a key
//! atomically, and Redis handles expiry.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde_json::Value as JsonValue;
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::KeyValueStore;

/// Redis key-value store. Keys are namespaced with a prefix.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    conn: MultiplexedConnection,
    prefix: String,
}

impl RedisKeyValueStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            prefix: "infravest".to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

fn cache_error(e: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::CacheError, format!("Redis error: {}", e))
}

#[async_trait]
impl KeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<JsonValue>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(self.namespaced(key)).await.map_err(cache_error)?;

        raw.map(|s| {
            serde_json::from_str(&s).map_err(|e| {
                DomainError::new(
                    ErrorCode::CacheError,
                    format!("Corrupt cache entry {}: {}", key, e),
                )
            })
        })
        .transpose()
    }

    async fn set(
        &self,
        key: &str,
        value: JsonValue,
        ttl: Option<Duration>,
    ) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let key = self.namespaced(key);
        let body = value.to_string();

        match ttl {
            Some(ttl) => conn
                .set_ex::<_, _, ()>(&key, body, ttl.as_secs().max(1))
                .await
                .map_err(cache_error),
            None => conn.set::<_, _, ()>(&key, body).await.map_err(cache_error),
        }
    }

    async fn evict(&self, key: &str) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.namespaced(key))
            .await
            .map_err(cache_error)
    }
}

impl std::fmt::Debug for RedisKeyValueStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisKeyValueStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    // Redis integration tests require a running Redis instance
    // and are run separately from unit tests.
}
