use std::fmt;

static KNOWN_UNITS: [Units; 3] = [Units::Imperial, Units::Metric, Units::Standard];

/// Unit system requested from the provider.
///
/// Unrecognised values are kept verbatim in `Other` and forwarded as-is;
/// the provider decides what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Units {
    #[default]
    Imperial,
    Metric,
    Standard,
    Other(String),
}

impl Units {
    pub fn as_str(&self) -> &str {
        match self {
            Units::Imperial => "imperial",
            Units::Metric => "metric",
            Units::Standard => "standard",
            Units::Other(raw) => raw.as_str(),
        }
    }

    /// The unit systems the provider documents, in form order.
    pub fn known() -> &'static [Units] {
        &KNOWN_UNITS
    }

    /// Temperature suffix shown next to readings, empty for unknown systems.
    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Imperial => "°F",
            Units::Metric => "°C",
            Units::Standard => "K",
            Units::Other(_) => "",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Units {
    fn from(value: &str) -> Self {
        match value {
            "imperial" => Units::Imperial,
            "metric" => Units::Metric,
            "standard" => Units::Standard,
            other => Units::Other(other.to_string()),
        }
    }
}

/// A validated lookup, built per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub zip_code: String,
    pub units: Units,
    pub country_code: String,
}

/// Normalized current conditions extracted from a provider payload.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub city: String,
    pub country: String,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// All condition descriptions joined with ", ".
    pub description: String,
}
