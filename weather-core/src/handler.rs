use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::{
    cache::WeatherCache,
    config::Config,
    error::WeatherError,
    model::{Units, WeatherQuery, WeatherRecord},
    parser::parse_weather,
    provider::{OpenWeatherClient, WeatherFetcher},
    validate::{WeatherParams, validate},
};

/// What the web layer should render for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Weather page for `record`.
    Weather {
        record: WeatherRecord,
        /// Unit system the temperatures are in.
        units: Units,
    },
    /// Input form, optionally annotated with a message.
    Form { error: Option<String> },
}

impl Outcome {
    pub fn form_with_error(message: impl Into<String>) -> Self {
        Outcome::Form {
            error: Some(message.into()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Form { error } => error.as_deref(),
            Outcome::Weather { .. } => None,
        }
    }
}

/// Drives validate -> cache lookup -> fetch -> status check -> parse ->
/// cache store for each request.
#[derive(Debug)]
pub struct WeatherHandler {
    cache: WeatherCache,
    fetcher: Arc<dyn WeatherFetcher>,
    country_code: String,
}

impl WeatherHandler {
    pub fn new(config: &Config, fetcher: Arc<dyn WeatherFetcher>) -> Self {
        Self {
            cache: WeatherCache::new(config.cache_ttl),
            fetcher,
            country_code: config.country_code.clone(),
        }
    }

    /// Handler backed by the real OpenWeather client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = OpenWeatherClient::new(config)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn cache(&self) -> &WeatherCache {
        &self.cache
    }

    /// Run one request to completion. Failures become a form with a
    /// user-facing message; details only go to the log.
    #[instrument(skip(self, params), fields(zip = %params.zip_code.trim()))]
    pub async fn handle(&self, params: &WeatherParams) -> Outcome {
        match self.lookup(params).await {
            Ok((query, record)) => Outcome::Weather {
                record,
                units: query.units,
            },
            Err(err) => {
                log_failure(&err, params.zip_code.trim());
                Outcome::form_with_error(err.user_message())
            }
        }
    }

    pub async fn lookup(
        &self,
        params: &WeatherParams,
    ) -> Result<(WeatherQuery, WeatherRecord), WeatherError> {
        let zip = params.zip_code.trim();
        let units = params.units.as_deref().unwrap_or("imperial");
        info!("Received zip code: {zip} with units={units}");

        let query = validate(params, &self.country_code)?;

        let key = WeatherCache::key(&query.zip_code, &query.units);
        if let Some(record) = self.cache.get(&key) {
            return Ok((query, record));
        }

        let Some(response) = self.fetcher.fetch(&query).await else {
            let zip = query.zip_code;
            return Err(WeatherError::Transport { zip });
        };

        match response.status {
            200 => {
                let record = parse_weather(&response.body)?;
                info!("Successfully retrieved weather for {}", query.zip_code);
                self.cache.put(key, record.clone());
                Ok((query, record))
            }
            404 => {
                let zip = query.zip_code;
                Err(WeatherError::NotFound { zip })
            }
            status => {
                let zip = query.zip_code;
                Err(WeatherError::UpstreamStatus { zip, status })
            }
        }
    }
}

fn log_failure(err: &WeatherError, zip: &str) {
    match err {
        WeatherError::InvalidZip(_) => warn!("Invalid zip code entered: {zip}"),
        WeatherError::Transport { .. } => error!("Request failed for zip: {zip}"),
        WeatherError::NotFound { .. } => warn!("No data found for zip: {zip}"),
        WeatherError::UpstreamStatus { status, .. } => {
            error!("Unexpected status code {status} for zip: {zip}")
        }
        WeatherError::Parse(e) => error!("Error parsing weather data for zip {zip}: {e}"),
        WeatherError::Unexpected(e) => error!("Unexpected error for zip {zip}: {e}"),
    }
}
