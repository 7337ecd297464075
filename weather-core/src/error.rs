use thiserror::Error;

pub const INVALID_ZIP_MESSAGE: &str = "Please enter a valid 5-digit US zip code.";
pub const TRANSPORT_MESSAGE: &str =
    "Something went wrong while fetching the weather. Please try again later.";
pub const UPSTREAM_MESSAGE: &str =
    "Something went wrong while pulling the weather. Please try again later.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Every way a single weather lookup can fail.
///
/// `Display` carries diagnostic detail for logs; what the user sees comes
/// from [`WeatherError::user_message`].
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid zip code: {0:?}")]
    InvalidZip(String),

    #[error("request to weather provider failed for zip {zip}")]
    Transport { zip: String },

    #[error("no weather data for zip {zip}")]
    NotFound { zip: String },

    #[error("unexpected status {status} from weather provider for zip {zip}")]
    UpstreamStatus { zip: String, status: u16 },

    #[error("failed to parse weather payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl WeatherError {
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::InvalidZip(_) => INVALID_ZIP_MESSAGE.to_string(),
            WeatherError::Transport { .. } => TRANSPORT_MESSAGE.to_string(),
            WeatherError::NotFound { zip } => not_found_message(zip),
            WeatherError::UpstreamStatus { .. } => UPSTREAM_MESSAGE.to_string(),
            WeatherError::Parse(_) => UNEXPECTED_MESSAGE.to_string(),
            WeatherError::Unexpected(_) => UNEXPECTED_MESSAGE.to_string(),
        }
    }
}

fn not_found_message(zip: &str) -> String {
    let unavailable = format!("Weather information is not available for {zip}.");
    format!("{unavailable} Please try a different zip code.")
}
