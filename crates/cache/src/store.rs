//! The seam between the cache manager and the distributed store.

use std::collections::HashMap;

mod redis;

pub use redis::RedisStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("cache connection error: {0}")]
    Connection(String),
    #[error("cache command error: {0}")]
    Command(String),
}

/// A distributed key-value store partitioned into named regions.
///
/// The surface is deliberately small and string-valued; storage semantics
/// (replication, eviction) belong entirely to the backing engine.
/// Implementations are cheap to clone.
pub trait CacheStore: Clone + Send + Sync + 'static {
    /// Replaces the whole region → expiration mapping. The engine works in
    /// terms of the complete mapping, not per-region updates.
    fn set_expires(&self, expires: HashMap<String, u64>);

    /// Whether the named region may be handed out.
    fn region_exists(&self, name: &str) -> bool;

    fn get(&self, region: &str, key: &str) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Writes a value, applying the region's expiration as a TTL when one
    /// is configured.
    fn put(&self, region: &str, key: &str, value: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn evict(&self, region: &str, key: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}
