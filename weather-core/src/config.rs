use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    net::SocketAddr,
    path::{Path, PathBuf},
    time::Duration,
};

pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";
pub const DEFAULT_BASE_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_COUNTRY_CODE: &str = "us";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(10 * 60);
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Optional settings stored on disk.
///
/// Example TOML:
/// ```toml
/// bind_addr = "0.0.0.0:8080"
/// cache_ttl_secs = 300
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub cache_ttl_secs: Option<u64>,
    pub bind_addr: Option<String>,
}

impl FileConfig {
    /// Load from `path`, or from the platform config dir when `None`.
    /// A file that doesn't exist yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_file_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-web")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Runtime configuration, built once at startup and shared by the fetcher
/// and the request handler.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub bind_addr: SocketAddr,
    pub country_code: String,
}

impl Config {
    /// Read the config file and the API key from the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = FileConfig::load(path)?;
        Self::from_parts(file, std::env::var(API_KEY_ENV).ok())
    }

    /// Combine file settings with an API key; fails if the key is absent
    /// or blank.
    pub fn from_parts(file: FileConfig, api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| anyhow!("Missing {API_KEY_ENV} in environment config"))?;

        let FileConfig {
            base_url,
            request_timeout_secs,
            cache_ttl_secs,
            bind_addr,
        } = file;

        let bind_addr = bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .with_context(|| format!("Invalid bind address: {bind_addr}"))?;

        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let request_timeout = request_timeout_secs.map(Duration::from_secs);
        let cache_ttl = cache_ttl_secs.map(Duration::from_secs);

        Ok(Self {
            api_key,
            base_url,
            request_timeout: request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            cache_ttl: cache_ttl.unwrap_or(DEFAULT_CACHE_TTL),
            bind_addr,
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        })
    }

    /// Config pointing at an arbitrary provider URL, mostly for tests.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let key = Some(api_key.to_string());
        let mut cfg = Self::from_parts(FileConfig::default(), key)?;
        cfg.base_url = base_url.to_string();
        Ok(cfg)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .field("cache_ttl", &self.cache_ttl)
            .field("bind_addr", &self.bind_addr)
            .field("country_code", &self.country_code)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_fails_fast() {
        let file = FileConfig::default();
        let blank = Some("   ".to_string());

        let err = Config::from_parts(file.clone(), None).unwrap_err();
        assert!(err.to_string().contains("Missing OPENWEATHER_API_KEY"));

        let err = Config::from_parts(file, blank).unwrap_err();
        assert!(err.to_string().contains("Missing OPENWEATHER_API_KEY"));
    }

    #[test]
    fn defaults_apply_without_file() {
        let file = FileConfig::default();
        let cfg = Config::from_parts(file, Some("KEY".into())).unwrap();

        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
        assert_eq!(cfg.cache_ttl, Duration::from_secs(600));
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.country_code, "us");
    }

    #[test]
    fn file_settings_override_defaults() {
        let toml = r#"
            base_url = "http://localhost:9999/weather"
            request_timeout_secs = 2
            cache_ttl_secs = 30
            bind_addr = "0.0.0.0:8080"
        "#;
        let file = FileConfig::from_toml(toml).unwrap();

        let cfg = Config::from_parts(file, Some("KEY".into())).unwrap();
        assert_eq!(cfg.base_url, "http://localhost:9999/weather");
        assert_eq!(cfg.request_timeout, Duration::from_secs(2));
        assert_eq!(cfg.cache_ttl, Duration::from_secs(30));
        assert_eq!(cfg.bind_addr.port(), 8080);
    }

    #[test]
    fn bad_bind_addr_is_rejected() {
        let file = FileConfig {
            bind_addr: Some("not an addr".into()),
            ..Default::default()
        };
        let err = Config::from_parts(file, Some("KEY".into())).unwrap_err();
        assert!(err.to_string().contains("Invalid bind address"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let bad = "cache_ttl_secs = \"ten\"";
        assert!(FileConfig::from_toml(bad).is_err());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = std::env::temp_dir();
        let path = dir.join("weather-web-does-not-exist.toml");

        let file = FileConfig::load(Some(&path)).unwrap();
        assert!(file.base_url.is_none());
        assert!(file.bind_addr.is_none());
    }

    #[test]
    fn file_is_read_from_explicit_path() {
        let name = format!("weather-web-{}.toml", std::process::id());
        let path = std::env::temp_dir().join(name);
        fs::write(&path, "cache_ttl_secs = 42\n").unwrap();

        let file = FileConfig::load(Some(&path)).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(file.cache_ttl_secs, Some(42));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let file = FileConfig::default();
        let cfg = Config::from_parts(file, Some("SECRET".into())).unwrap();

        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("SECRET"));
        assert!(dbg.contains("<redacted>"));
    }
}
