pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod patients;
pub mod pipeline;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing and run the HTTP service.
pub async fn run() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    // The Ollama availability probe uses a blocking HTTP client; keep it off
    // the async runtime threads.
    let ctx = tokio::task::spawn_blocking(api::server::build_context)
        .await
        .map_err(|e| std::io::Error::other(format!("startup task failed: {e}")))?
        .map_err(|e| std::io::Error::other(format!("failed to open query store: {e}")))?;
    api::server::serve(ctx).await
}
