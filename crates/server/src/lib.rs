//! Gateway-facing HTTP surface of the helper.

mod check;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use auth::ValidateToken;
use axum::{Extension, Router, routing::get};
use cache::{CacheManager, RedisStore};
use config::Config;

use crate::check::AppState;

pub async fn serve<V>(config: Config, validator: V, cache: CacheManager<RedisStore>) -> anyhow::Result<()>
where
    V: ValidateToken + 'static,
{
    let listen_address = config
        .server
        .listen_address
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 7000)));

    let app = router(validator).layer(Extension(Arc::new(cache)));

    let listener = tokio::net::TcpListener::bind(listen_address)
        .await
        .with_context(|| format!("failed to bind {listen_address}"))?;

    log::info!("wicket listening on {listen_address}");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router<V>(validator: V) -> Router
where
    V: ValidateToken + 'static,
{
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/check", get(check::check::<V>))
        .with_state(AppState::new(validator))
}
