use clap::Parser;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing::info;
use weather_core::{Config, WeatherHandler};

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-web", version, about = "Weather by US zip code")]
pub struct Cli {
    /// Address to listen on, e.g. "0.0.0.0:8080". Overrides the config file.
    #[arg(long, env = "WEATHER_BIND")]
    pub bind: Option<SocketAddr>,

    /// Path to a TOML config file; defaults to the platform config dir.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let mut config = Config::load(self.config.as_deref())?;
        if let Some(bind) = self.bind {
            config.bind_addr = bind;
        }
        info!(?config, "Loaded configuration");

        let handler = WeatherHandler::from_config(&config)?;
        server::serve(config.bind_addr, Arc::new(handler)).await
    }
}
