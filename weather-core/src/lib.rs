//! Core library for the zip-code weather service.
//!
//! This crate defines:
//! - Configuration (file + environment) and the provider API key
//! - Input validation of zip code / unit system
//! - A TTL cache of normalized weather records
//! - The OpenWeather fetcher and payload parser
//! - The per-request handler that ties them together
//!
//! It is used by `weather-web`, but has no dependency on any web framework.

pub mod cache;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod parser;
pub mod provider;
pub mod validate;

pub use cache::WeatherCache;
pub use config::{Config, FileConfig};
pub use error::WeatherError;
pub use handler::{Outcome, WeatherHandler};
pub use model::{Units, WeatherQuery, WeatherRecord};
pub use parser::parse_weather;
pub use provider::{OpenWeatherClient, RawResponse, WeatherFetcher};
pub use validate::{WeatherParams, validate};
