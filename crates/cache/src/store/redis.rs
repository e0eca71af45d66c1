use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use config::CacheConfig;
use redis::aio::ConnectionManager;

use super::{CacheStore, StoreError};

/// Redis-backed store. Regions share one connection (multiplexed by the
/// connection manager); region membership is encoded into the key.
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
    key_prefix: String,
    create_missing: bool,
    declared: Arc<BTreeSet<String>>,
    expires: Arc<Mutex<HashMap<String, u64>>>,
}

impl RedisStore {
    pub async fn new(config: &CacheConfig) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(config.url.as_str()).map_err(|e| StoreError::Connection(e.to_string()))?;

        let manager = client
            .get_connection_manager()
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            manager,
            key_prefix: config.key_prefix.clone(),
            create_missing: config.create_missing_regions,
            declared: Arc::new(config.regions.keys().cloned().collect()),
            expires: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    fn key(&self, region: &str, key: &str) -> String {
        format!("{}:{region}:{key}", self.key_prefix)
    }

    fn expiration(&self, region: &str) -> Option<u64> {
        self.expires
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(region)
            .copied()
    }
}

impl CacheStore for RedisStore {
    fn set_expires(&self, expires: HashMap<String, u64>) {
        *self
            .expires
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = expires;
    }

    fn region_exists(&self, name: &str) -> bool {
        self.create_missing || self.declared.contains(name)
    }

    async fn get(&self, region: &str, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.manager.clone();

        let value: Option<String> = redis::cmd("GET")
            .arg(self.key(region, key))
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Command(e.to_string()))?;

        Ok(value)
    }

    async fn put(&self, region: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(self.key(region, key)).arg(value);

        // `SET key value EX <seconds>` when the region has an expiration.
        if let Some(seconds) = self.expiration(region) {
            cmd.arg("EX").arg(seconds);
        }

        let _: () = cmd
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Command(e.to_string()))?;

        Ok(())
    }

    async fn evict(&self, region: &str, key: &str) -> Result<(), StoreError> {
        let mut conn = self.manager.clone();

        let _: () = redis::cmd("DEL")
            .arg(self.key(region, key))
            .query_async(&mut conn)
            .await
            .map_err(|e| StoreError::Command(e.to_string()))?;

        Ok(())
    }
}
