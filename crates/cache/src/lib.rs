//! Second-level cache adapter over a distributed key-value store.
//!
//! The manager owns the region → expiration mapping and hands out region
//! handles; all storage semantics stay with the backing [`CacheStore`].

mod spec;
mod store;

use std::collections::HashMap;

use config::RegionConfig;
use futures_util::lock::Mutex;

pub use spec::{RegionSpec, SpecError};
pub use store::{CacheStore, RedisStore, StoreError};

/// Configures and hands out named cache regions.
///
/// One critical section serializes every configure-and-fetch: configuring a
/// region's expiration and fetching its handle is a single atomic step, so
/// two callers configuring the same region concurrently cannot interleave.
/// The serialization across distinct names is a throughput bottleneck this
/// design accepts for correctness.
pub struct CacheManager<S> {
    store: S,
    expires: Mutex<HashMap<String, u64>>,
}

impl<S: CacheStore> CacheManager<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            expires: Mutex::new(HashMap::new()),
        }
    }

    /// Builds a manager and applies every declared region's specification
    /// up front, so a misconfigured region fails startup instead of the
    /// first request.
    pub async fn with_regions<'a, I>(store: S, regions: I) -> Result<Self, SpecError>
    where
        I: IntoIterator<Item = (&'a String, &'a RegionConfig)>,
    {
        let manager = Self::new(store);

        for (name, region) in regions {
            manager.get_region(name, &region.spec).await?;
            log::debug!("configured cache region '{name}' with spec '{}'", region.spec);
        }

        Ok(manager)
    }

    /// Applies `spec` to the named region and fetches its handle.
    ///
    /// A malformed specification fails the call before any state changes.
    /// After a successful parse the whole accumulated mapping is re-applied
    /// to the store — the engine replaces the mapping wholesale, so pushing
    /// only the changed region would drop the others. Returns `None` when
    /// the store does not know the region.
    pub async fn get_region(&self, name: &str, spec: &str) -> Result<Option<Region<S>>, SpecError> {
        let mut expires = self.expires.lock().await;

        if !spec.trim().is_empty() {
            let parsed = RegionSpec::parse(spec)?;

            if let Some(seconds) = parsed.expiration {
                log::debug!("cache region '{name}' expiration set to {seconds}s");
                expires.insert(name.to_string(), seconds);
            }

            self.store.set_expires(expires.clone());
        }

        if !self.store.region_exists(name) {
            return Ok(None);
        }

        Ok(Some(Region {
            name: name.to_string(),
            store: self.store.clone(),
        }))
    }
}

/// A handle to one named region. Get/put/evict proxy straight to the
/// distributed store; `put` carries the region's configured expiration.
#[derive(Clone, Debug)]
pub struct Region<S> {
    name: String,
    store: S,
}

impl<S: CacheStore> Region<S> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.store.get(&self.name, key).await
    }

    pub async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.store.put(&self.name, key, value).await
    }

    pub async fn evict(&self, key: &str) -> Result<(), StoreError> {
        self.store.evict(&self.name, key).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use super::*;

    /// In-memory store recording what the manager applies and writes.
    #[derive(Clone, Debug, Default)]
    struct MemoryStore {
        expires: Arc<Mutex<HashMap<String, u64>>>,
        declared: Arc<Vec<String>>,
        create_missing: bool,
        data: Arc<Mutex<HashMap<String, String>>>,
        put_ttls: Arc<Mutex<Vec<(String, Option<u64>)>>>,
    }

    impl MemoryStore {
        fn declaring(regions: &[&str]) -> Self {
            Self {
                declared: Arc::new(regions.iter().map(|s| s.to_string()).collect()),
                create_missing: false,
                ..Self::default()
            }
        }

        fn applied_expires(&self) -> HashMap<String, u64> {
            self.expires.lock().unwrap().clone()
        }
    }

    impl CacheStore for MemoryStore {
        fn set_expires(&self, expires: HashMap<String, u64>) {
            *self.expires.lock().unwrap() = expires;
        }

        fn region_exists(&self, name: &str) -> bool {
            self.create_missing || self.declared.iter().any(|region| region == name)
        }

        async fn get(&self, region: &str, key: &str) -> Result<Option<String>, StoreError> {
            Ok(self.data.lock().unwrap().get(&format!("{region}:{key}")).cloned())
        }

        async fn put(&self, region: &str, key: &str, value: &str) -> Result<(), StoreError> {
            let ttl = self.expires.lock().unwrap().get(region).copied();
            self.put_ttls.lock().unwrap().push((region.to_string(), ttl));
            self.data
                .lock()
                .unwrap()
                .insert(format!("{region}:{key}"), value.to_string());
            Ok(())
        }

        async fn evict(&self, region: &str, key: &str) -> Result<(), StoreError> {
            self.data.lock().unwrap().remove(&format!("{region}:{key}"));
            Ok(())
        }
    }

    #[tokio::test]
    async fn expiration_survives_reconfiguration_with_empty_spec() {
        let store = MemoryStore::declaring(&["orders"]);
        let manager = CacheManager::new(store.clone());

        manager.get_region("orders", "expiration=30").await.unwrap().unwrap();
        manager.get_region("orders", "").await.unwrap().unwrap();

        assert_eq!(store.applied_expires().get("orders"), Some(&30));
    }

    #[tokio::test]
    async fn whole_mapping_reapply_keeps_other_regions() {
        let store = MemoryStore::declaring(&["orders", "users"]);
        let manager = CacheManager::new(store.clone());

        manager.get_region("orders", "expiration=30").await.unwrap().unwrap();
        manager.get_region("users", "expiration=60").await.unwrap().unwrap();

        let applied = store.applied_expires();
        assert_eq!(applied.get("orders"), Some(&30));
        assert_eq!(applied.get("users"), Some(&60));
    }

    #[tokio::test]
    async fn last_configured_expiration_wins() {
        let store = MemoryStore::declaring(&["orders"]);
        let manager = CacheManager::new(store.clone());

        manager.get_region("orders", "expiration=30").await.unwrap().unwrap();
        manager.get_region("orders", "expiration=45").await.unwrap().unwrap();

        assert_eq!(store.applied_expires().get("orders"), Some(&45));
    }

    #[tokio::test]
    async fn malformed_spec_fails_without_mutating_state() {
        let store = MemoryStore::declaring(&["orders"]);
        let manager = CacheManager::new(store.clone());

        manager.get_region("orders", "expiration=30").await.unwrap().unwrap();

        let error = manager.get_region("orders", "expiration=abc").await.unwrap_err();
        assert!(matches!(error, SpecError::InvalidExpiration { .. }));

        assert_eq!(store.applied_expires().get("orders"), Some(&30));
    }

    #[tokio::test]
    async fn unknown_region_yields_no_handle() {
        let store = MemoryStore::declaring(&["orders"]);
        let manager = CacheManager::new(store);

        let region = manager.get_region("sessions", "").await.unwrap();
        assert!(region.is_none());
    }

    #[tokio::test]
    async fn unknown_keys_in_spec_do_not_block_the_fetch() {
        let store = MemoryStore::declaring(&["orders"]);
        let manager = CacheManager::new(store.clone());

        let region = manager.get_region("orders", "mode=lru,expiration=30").await.unwrap();

        assert!(region.is_some());
        assert_eq!(store.applied_expires().get("orders"), Some(&30));
    }

    #[tokio::test]
    async fn puts_carry_the_configured_expiration() {
        let store = MemoryStore::declaring(&["orders"]);
        let manager = CacheManager::new(store.clone());

        let region = manager.get_region("orders", "expiration=30").await.unwrap().unwrap();
        region.put("42", "pending").await.unwrap();

        assert_eq!(region.get("42").await.unwrap().as_deref(), Some("pending"));
        assert_eq!(
            store.put_ttls.lock().unwrap().as_slice(),
            &[("orders".to_string(), Some(30))]
        );

        region.evict("42").await.unwrap();
        assert_eq!(region.get("42").await.unwrap(), None);
    }

    #[tokio::test]
    async fn with_regions_applies_declared_specs() {
        let store = MemoryStore::declaring(&["user"]);

        let mut regions = BTreeMap::new();
        regions.insert(
            "user".to_string(),
            RegionConfig {
                spec: "expiration=300".to_string(),
            },
        );

        let _manager = CacheManager::with_regions(store.clone(), &regions).await.unwrap();

        assert_eq!(store.applied_expires().get("user"), Some(&300));
    }

    #[tokio::test]
    async fn with_regions_fails_on_malformed_spec() {
        let store = MemoryStore::declaring(&["user"]);

        let mut regions = BTreeMap::new();
        regions.insert(
            "user".to_string(),
            RegionConfig {
                spec: "expiration=oops".to_string(),
            },
        );

        assert!(CacheManager::with_regions(store, &regions).await.is_err());
    }
}
