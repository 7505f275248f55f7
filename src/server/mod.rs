pub mod api;

use crate::ConsoleEngine;

/// Binds the console API and serves it until the engine's shutdown token
/// fires. In-flight aggregations observe the same token and abort instead
/// of returning half-built rollups.
pub async fn start_api_server(engine: ConsoleEngine, host: &str, port: u16) -> std::io::Result<()> {
    let shutdown = engine.shutdown.clone();
    let app = api::router(engine);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("🌐 Console API available at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
}
