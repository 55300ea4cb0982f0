//! Badge data service binary.
//!
//! Assembles every data source explicitly, in a defined order, before
//! sealing the registry; no load-time registration side effects.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use badgedata::cache::DashboardCache;
use badgedata::config::{load_config, BadgeConfig};
use badgedata::http::HttpServer;
use badgedata::registry::Registry;
use badgedata::sources::GrafanaSource;
use badgedata::upstream::DashboardClient;

#[derive(Parser)]
#[command(name = "badgedata")]
#[command(about = "Badge data service for badgen.net", long_about = None)]
struct Cli {
    /// Path to a TOML config file; built-in defaults are used if absent.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BadgeConfig::default(),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(format!(
                    "badgedata={},tower_http=info",
                    config.observability.log_level
                ))
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        refresh_secs = config.cache.refresh_secs,
        max_ids = config.cache.max_ids,
        "Configuration loaded"
    );

    // Assemble data sources, then seal the registry into a dispatcher.
    let cache = Arc::new(DashboardCache::new(Duration::from_secs(
        config.cache.refresh_secs,
    )));
    let client = DashboardClient::new(
        config.upstream.base_url.clone(),
        Duration::from_secs(config.upstream.timeout_secs),
    );
    let grafana = GrafanaSource::new(cache, client, config.cache.max_ids);

    let registry = Registry::new();
    registry.register("grafana", Arc::new(grafana));
    let dispatcher = registry.build_dispatcher();

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let server = HttpServer::new(&config, dispatcher);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
