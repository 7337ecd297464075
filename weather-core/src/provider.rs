use crate::model::WeatherQuery;
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Status and body of a completed provider call. Interpreting the status
/// is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Outbound "current weather by zip" call.
///
/// Transport failures (timeout, DNS, refused connection, unreadable body)
/// are logged by the implementation and reported as `None`; they never
/// surface as errors.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch(&self, query: &WeatherQuery) -> Option<RawResponse>;
}
