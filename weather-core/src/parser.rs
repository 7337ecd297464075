use serde::Deserialize;

use crate::{error::WeatherError, model::WeatherRecord};

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

/// Subset of the OpenWeather "current weather" payload we rely on.
#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
}

impl From<OwCurrentResponse> for WeatherRecord {
    fn from(parsed: OwCurrentResponse) -> Self {
        let description = parsed
            .weather
            .iter()
            .map(|w| w.description.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        WeatherRecord {
            city: parsed.name,
            country: parsed.sys.country,
            temp: parsed.main.temp,
            temp_min: parsed.main.temp_min,
            temp_max: parsed.main.temp_max,
            description,
        }
    }
}

/// Parse a raw response body. Any missing or mistyped field is an error;
/// nothing is defaulted.
pub fn parse_weather(body: &str) -> Result<WeatherRecord, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    Ok(parsed.into())
}

/// Same as [`parse_weather`] for an already decoded JSON value.
pub fn parse_weather_value(value: serde_json::Value) -> Result<WeatherRecord, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_value(value)?;
    Ok(parsed.into())
}
