//! HTTP server configuration settings.

use std::net::SocketAddr;

use serde::Deserialize;

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// The socket address the helper should listen on.
    pub listen_address: Option<SocketAddr>,
}
