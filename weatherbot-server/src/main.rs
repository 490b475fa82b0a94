//! Binary crate for the weather chatbot webhook server.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weatherbot_core::{Bot, Config};

use weatherbot_server::routes;

/// Webhook server bridging an intent-recognition service and a weather
/// provider.
#[derive(Debug, Parser)]
#[command(name = "weatherbot-server", version, about)]
struct Args {
    /// Path to the TOML config file. Defaults to the platform config dir.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let bot = Arc::new(Bot::new(&config));
    let app = routes::router(bot);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
            .await
            .with_context(|| {
                format!("Failed to bind {}:{}", config.server.host, config.server.port)
            })?;

    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
