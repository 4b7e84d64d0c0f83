//! Serve command - run the HTTP API

use crate::cache::ResultCache;
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::error::RackResult;
use crate::server::Server;
use crate::service::RackService;
use console::style;
use std::sync::Arc;
use tracing::info;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: &Config) -> RackResult<()> {
    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let ttl_secs = args.cache_ttl.unwrap_or(config.cache.ttl_secs);
    let expiry = args.expiry.unwrap_or(config.cache.expiry);

    let cache = ResultCache::from_secs(ttl_secs, expiry);
    match cache.ttl() {
        Some(ttl) => info!("Cache TTL {}s with {} expiry", ttl.as_secs(), expiry),
        None => info!("Cache expiry disabled"),
    }

    let service = Arc::new(RackService::new(cache, config.defaults));
    let server = Server::bind(&format!("{}:{}", host, port), service).await?;

    println!(
        "{} Serving on {}",
        style("✓").green(),
        style(server.local_addr()?).cyan()
    );

    server.run().await
}
