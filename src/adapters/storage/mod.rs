//! Storage Adapters
//!
//! In-memory and Redis implementations of the persistence ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryProjectRepository / InMemoryUserRepository** - Repositories in memory (testing/development)
//! - **InMemoryKeyValueStore** - Key-value store with lazy expiry
//! - **RedisKeyValueStore** - Shared key-value store for production
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryKeyValueStore, RedisKeyValueStore};
//!
//! // Production: Redis
//! let store = RedisKeyValueStore::new(conn);
//!
//! // Testing: in-memory
//! let store = InMemoryKeyValueStore::new();
//! ```

mod in_memory_key_value_store;
mod in_memory_repositories;
mod redis_key_value_store;

pub use in_memory_key_value_store::InMemoryKeyValueStore;
pub use in_memory_repositories::{InMemoryProjectRepository, InMemoryUserRepository};
pub use redis_key_value_store::RedisKeyValueStore;
