use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vantage::cluster::fixture::FixtureCluster;
use vantage::config::Config;
use vantage::console::hooks::AllowAllHooks;
use vantage::{server, ConsoleEngine};

// ========================================
// MAIN ENTRY POINT
// ========================================

#[tokio::main]
async fn main() {
    let config = Config::global();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone())),
        )
        .init();

    tracing::info!("🚀 Vantage console starting...");
    tracing::info!(
        seed_brokers = ?config.cluster.seed_brokers,
        "demo mode: serving a fixture cluster until a wire client is attached"
    );

    let cluster = Arc::new(FixtureCluster::demo());
    let engine = ConsoleEngine::new(cluster, Arc::new(AllowAllHooks));

    let shutdown = engine.shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received, cancelling in-flight requests");
            shutdown.cancel();
        }
    });

    if let Err(e) = server::start_api_server(engine, &config.server.host, config.server.port).await
    {
        tracing::error!(error = %e, "console API server failed");
        std::process::exit(1);
    }
}
