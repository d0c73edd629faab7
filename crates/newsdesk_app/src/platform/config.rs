//! Endpoint and transport configuration, stored as RON.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use newsdesk_engine::{DispatchSettings, Endpoints};
use newsdesk_logging::{newsdesk_info, newsdesk_warn};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILENAME: &str = "newsdesk.ron";
/// When set, every page talks to this one base URL.
pub const BASE_URL_ENV: &str = "NEWSDESK_BASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub ask: String,
    pub sources: String,
    pub search: String,
    pub aggregate: String,
    pub scrape: String,
    pub explore: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        let defaults = Endpoints::default();
        Self {
            ask: defaults.ask,
            sources: defaults.sources,
            search: defaults.search,
            aggregate: defaults.aggregate,
            scrape: defaults.scrape,
            explore: defaults.explore,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoints: EndpointConfig,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointConfig::default(),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            max_response_bytes: DispatchSettings::default().max_bytes,
        }
    }
}

impl AppConfig {
    /// Loads `explicit` if given (it must exist), otherwise `./newsdesk.ron`
    /// when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from(path, true),
            None => Self::load_from(Path::new(CONFIG_FILENAME), false),
        }
    }

    /// Reads `path`. A missing file yields defaults unless `required`.
    pub fn load_from(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                newsdesk_info!("No config at {:?}; using defaults", path);
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::parse(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })?;
        newsdesk_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        ron::from_str(content).map_err(|err| err.to_string())
    }

    pub fn to_ron(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::new())
            .map_err(|err| ConfigError::Serialize(err.to_string()))
    }

    /// Applies the value of [`BASE_URL_ENV`], if any.
    pub fn with_base_url_override(mut self, base: Option<String>) -> Self {
        match base.as_deref().map(str::trim) {
            Some(base) if !base.is_empty() => {
                newsdesk_info!("{} overrides all endpoints with {}", BASE_URL_ENV, base);
                let all = base.to_string();
                self.endpoints = EndpointConfig {
                    ask: all.clone(),
                    sources: all.clone(),
                    search: all.clone(),
                    aggregate: all.clone(),
                    scrape: all.clone(),
                    explore: all,
                };
            }
            Some(_) => newsdesk_warn!("{} is set but blank; ignoring", BASE_URL_ENV),
            None => {}
        }
        self
    }

    pub fn dispatch_settings(&self) -> DispatchSettings {
        DispatchSettings {
            endpoints: Endpoints {
                ask: self.endpoints.ask.clone(),
                sources: self.endpoints.sources.clone(),
                search: self.endpoints.search.clone(),
                aggregate: self.endpoints.aggregate.clone(),
                scrape: self.endpoints.scrape.clone(),
                explore: self.endpoints.explore.clone(),
            },
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_response_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::parse(
            r#"(endpoints: (search: "http://scraper:9000"), request_timeout_secs: Some(20))"#,
        )
        .unwrap();
        assert_eq!(config.endpoints.search, "http://scraper:9000");
        assert_eq!(config.endpoints.ask, "http://localhost:8002");
        assert_eq!(config.request_timeout_secs, Some(20));
        assert_eq!(config.connect_timeout_secs, None);
    }

    #[test]
    fn saved_config_loads_back() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.ron");
        let mut config = AppConfig::default();
        config.endpoints.aggregate = "http://coordinator:8003".to_string();
        config.max_response_bytes = 1024;
        fs::write(&path, config.to_ron().unwrap()).unwrap();

        assert_eq!(AppConfig::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = AppConfig::load(Some(&temp.path().join("absent.ron"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn optional_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        assert!(!path.exists());

        assert_eq!(AppConfig::load_from(&path, false).unwrap(), AppConfig::default());
        assert!(matches!(
            AppConfig::load_from(&path, true).unwrap_err(),
            ConfigError::Read { .. }
        ));
    }

    #[test]
    fn garbage_file_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.ron");
        fs::write(&path, "endpoints: [").unwrap();
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn base_url_override_applies_to_every_page() {
        let config = AppConfig::default().with_base_url_override(Some("http://gateway".into()));
        let settings = config.dispatch_settings();
        assert_eq!(settings.endpoints, Endpoints::uniform("http://gateway"));

        let untouched = AppConfig::default().with_base_url_override(Some("  ".into()));
        assert_eq!(untouched, AppConfig::default());
    }

    #[test]
    fn timeouts_stay_off_by_default() {
        let settings = AppConfig::default().dispatch_settings();
        assert_eq!(settings.connect_timeout, None);
        assert_eq!(settings.request_timeout, None);
    }
}
