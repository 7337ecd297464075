use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::WeatherError,
    model::{Units, WeatherQuery},
};

static ZIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("valid zip regex"));

/// Raw query string parameters of `GET /weather`, before validation.
#[derive(Debug, Clone, Default)]
pub struct WeatherParams {
    pub zip_code: String,
    pub units: Option<String>,
}

impl WeatherParams {
    pub fn new(zip_code: impl Into<String>, units: Option<&str>) -> Self {
        Self {
            zip_code: zip_code.into(),
            units: units.map(str::to_string),
        }
    }

    /// Build from decoded query pairs. When a key repeats, the first value
    /// wins; unknown keys are ignored.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut zip_code = None;
        let mut units = None;

        for (key, value) in pairs {
            match key.as_ref() {
                "zip_code" if zip_code.is_none() => zip_code = Some(value.into()),
                "units" if units.is_none() => units = Some(value.into()),
                _ => {}
            }
        }

        Self {
            zip_code: zip_code.unwrap_or_default(),
            units,
        }
    }
}

/// Trim and check the raw parameters.
///
/// Only the zip code is checked; `units` defaults to imperial and any other
/// value passes through untouched.
pub fn validate(params: &WeatherParams, country: &str) -> Result<WeatherQuery, WeatherError> {
    let zip_code = params.zip_code.trim();
    if !ZIP_RE.is_match(zip_code) {
        return Err(WeatherError::InvalidZip(zip_code.to_string()));
    }

    let units = params.units.as_deref().map(Units::from);

    Ok(WeatherQuery {
        zip_code: zip_code.to_string(),
        units: units.unwrap_or_default(),
        country_code: country.to_string(),
    })
}
