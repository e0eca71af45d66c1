//! Distributed cache configuration.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Settings for the redis-backed second-level cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Redis connection URL.
    pub url: String,
    /// Prefix applied to every key written to the store.
    pub key_prefix: String,
    /// Whether region names that were never declared may be fetched. When
    /// false, `get_region` returns no handle for unknown names.
    pub create_missing_regions: bool,
    /// Regions declared up front, with their option specification strings.
    pub regions: BTreeMap<String, RegionConfig>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            key_prefix: "wicket".to_string(),
            create_missing_regions: false,
            regions: BTreeMap::new(),
        }
    }
}

/// A single named cache region.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionConfig {
    /// Comma-separated `key=value` options, e.g. `"expiration=300"`.
    pub spec: String,
}
