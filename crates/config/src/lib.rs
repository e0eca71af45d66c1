mod auth;
mod cache;
mod error;
mod loader;
mod server;

use std::path::Path;

use serde::Deserialize;

pub use auth::{AuthConfig, UserCacheConfig};
pub use cache::{CacheConfig, RegionConfig};
pub use error::Error;
pub use server::ServerConfig;

pub(crate) type Result<T> = std::result::Result<T, error::Error>;

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
        loader::load(path)
    }
}
