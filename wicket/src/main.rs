use args::Args;
use clap::Parser;

mod args;
mod logger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(&args.log_filter);

    let config = config::Config::load(&args.config)?;

    let Some(userinfo_url) = config.auth.userinfo_url.clone() else {
        anyhow::bail!("auth.userinfo_url must be set to start the helper");
    };

    let validator = auth::TokenValidator::new(userinfo_url, config.auth.timeout);
    let validator = auth::MemoizedValidator::new(validator, &config.auth.cache);

    let store = cache::RedisStore::new(&config.cache).await?;
    let manager = cache::CacheManager::with_regions(store, &config.cache.regions).await?;

    server::serve(config, validator, manager).await
}
