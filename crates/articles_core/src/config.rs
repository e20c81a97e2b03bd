//! Runtime configuration.
//!
//! # Responsibility
//! - Merge an optional TOML file with `ARTICLES__*` environment overrides.
//! - Supply defaults so an empty environment still yields a usable config.
//!
//! # Invariants
//! - `base_url` is non-blank and `request_timeout_secs` is positive after
//!   a successful load.

use crate::fixture::DEFAULT_FIXTURE_PATH;
use crate::logging::default_log_level;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_BASENAME: &str = "articles";
/// Environment prefix; nested keys use `__`, e.g. `ARTICLES__LOG__LEVEL`.
pub const ENV_PREFIX: &str = "ARTICLES";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum ConfigError {
    Load(config::ConfigError),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "failed to load configuration: {err}"),
            Self::Invalid(message) => write!(f, "invalid configuration: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(value: config::ConfigError) -> Self {
        Self::Load(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Server root; the collection lives at `{base_url}/articles`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_fixture_path")]
    pub fixture_path: PathBuf,
    /// Handlebars template; the bundled one is used when unset.
    #[serde(default)]
    pub template_path: Option<PathBuf>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_level")]
    pub level: String,
    /// Absolute log directory. File logging stays off when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            fixture_path: default_fixture_path(),
            template_path: None,
            request_timeout_secs: default_request_timeout_secs(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("base_url cannot be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Loads configuration.
///
/// Sources, later ones winning:
/// 1. `path` when given (must exist), otherwise `articles.{toml,..}` in the
///    working directory if present.
/// 2. `ARTICLES__*` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder();
    let builder = match path {
        Some(path) => builder.add_source(File::from(path).required(true)),
        None => builder.add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false)),
    };

    let config = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize::<AppConfig>()?.validate()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_fixture_path() -> PathBuf {
    PathBuf::from(DEFAULT_FIXTURE_PATH)
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_level() -> String {
    default_log_level().to_string()
}
