//! Translation HTTP server binary.
//!
//! Loads configuration, starts the server and runs until Ctrl-C.

use kotoba::{AppConfig, TranslateServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("kotoba=info,kotoba_translate=info")
            }),
        )
        .init();

    let config = AppConfig::load().map_err(|e| {
        tracing::error!(error = %e, "failed to load config");
        anyhow::anyhow!("kotoba-server config: {e}")
    })?;

    let server = TranslateServer::start(&config)
        .await
        .map_err(|e| anyhow::anyhow!("kotoba-server failed to start: {e}"))?;

    tokio::signal::ctrl_c().await?;
    tracing::info!(addr = %server.addr(), "shutting down");
    server.shutdown();
    Ok(())
}
