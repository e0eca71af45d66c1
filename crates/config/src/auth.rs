//! Token validation configuration.

use std::time::Duration;

use duration_str::deserialize_duration;
use serde::Deserialize;
use url::Url;

/// Settings for the upstream token introspection call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// The user-details endpoint of the OAuth server. Token validation is
    /// disabled when unset.
    pub userinfo_url: Option<Url>,
    /// Upper bound on a single introspection call.
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    /// Memoization of validation outcomes, keyed by token.
    pub cache: UserCacheConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            userinfo_url: None,
            timeout: Duration::from_secs(10),
            cache: UserCacheConfig::default(),
        }
    }
}

/// Settings for the per-token outcome cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserCacheConfig {
    pub max_entries: u64,
    #[serde(deserialize_with = "deserialize_duration")]
    pub ttl: Duration,
    /// Namespace prefix of the cache keys derived from tokens.
    pub key_prefix: String,
}

impl Default for UserCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 5000,
            ttl: Duration::from_secs(300),
            key_prefix: "wicket:userdetails".to_string(),
        }
    }
}
