use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::{config::Config, model::WeatherQuery};

use super::{RawResponse, WeatherFetcher};

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            http,
        })
    }

    async fn send(&self, query: &WeatherQuery) -> reqwest::Result<RawResponse> {
        let zip = format!("{},{}", query.zip_code, query.country_code);
        let params = [
            ("zip", zip.as_str()),
            ("units", query.units.as_str()),
            ("appid", self.api_key.as_str()),
        ];

        let request = self.http.get(&self.base_url).query(&params);
        let res = request.send().await?;

        info!("Sent OpenWeather request for zip {}", query.zip_code);

        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    async fn fetch(&self, query: &WeatherQuery) -> Option<RawResponse> {
        let zip = &query.zip_code;

        match self.send(query).await {
            Ok(response) => Some(response),
            Err(e) if e.is_timeout() => {
                error!("Timeout while pulling weather for zip: {zip}");
                None
            }
            Err(e) => {
                // reqwest puts the full URL, API key included, in its Display.
                error!("Request error for zip {zip}: {}", e.without_url());
                None
            }
        }
    }
}
