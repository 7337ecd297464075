//! Binary crate for the `weather-web` service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and loading configuration
//! - Logging setup
//! - HTTP routing and HTML rendering

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;
mod server;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_logging();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
