//! Binary crate for the weather chatbot terminal client.
//!
//! This crate focuses on:
//! - The interactive chat loop
//! - Best-effort geolocation for "weather here" queries
//! - Rendering replies as a heading plus bullet lines

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod chat;
mod geolocate;
mod render;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = chat::Cli::parse();
    cli.run().await
}
