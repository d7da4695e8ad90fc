//! finagent - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the analysis API.

use finagent::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finagent=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: model={}",
        config.default_model.as_deref().unwrap_or("(not configured)")
    );

    let missing = config.missing_runtime_vars();
    if !missing.is_empty() {
        // The server still comes up; /analyze reports these until they are set.
        tracing::warn!("Missing environment variables: {}", missing.join(", "));
    }

    // Start HTTP server
    api::serve(config).await?;

    Ok(())
}
