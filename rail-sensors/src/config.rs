//! Service configuration, loaded from YAML.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::coordinator::CoordinatorSettings;
use crate::darwin::DarwinConfig;
use crate::planner::{PlannerCredentials, TransportApiConfig};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "RAIL_SENSORS_CONFIG";

/// Config file used when `RAIL_SENSORS_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default = "AppConfig::default_listen_addr")]
    pub listen_addr: SocketAddr,
    /// Where accepted entries are persisted.
    #[serde(default = "AppConfig::default_entries_path")]
    pub entries_path: PathBuf,
    #[serde(default = "AppConfig::default_update_interval_secs")]
    pub update_interval_secs: u64,
    /// Overrides the production Darwin endpoint.
    #[serde(default)]
    pub darwin_base_url: Option<String>,
    /// Overrides the production TransportAPI endpoint.
    #[serde(default)]
    pub transportapi_base_url: Option<String>,
    #[serde(default = "AppConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Keep provider payloads on snapshots.
    #[serde(default)]
    pub debug_raw: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            entries_path: Self::default_entries_path(),
            update_interval_secs: Self::default_update_interval_secs(),
            darwin_base_url: None,
            transportapi_base_url: None,
            timeout_secs: Self::default_timeout_secs(),
            debug_raw: false,
        }
    }
}

impl AppConfig {
    fn default_listen_addr() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 3000))
    }
    fn default_entries_path() -> PathBuf {
        PathBuf::from("entries.json")
    }
    fn default_update_interval_secs() -> u64 {
        90
    }
    fn default_timeout_secs() -> u64 {
        30
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Read(e.to_string()))?;

        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the service cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.update_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "update_interval_secs must be at least 1".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Load `path`, or fall back to defaults if it does not exist.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// The config path from the environment, else `config.yaml`.
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    pub fn coordinator_settings(&self) -> CoordinatorSettings {
        CoordinatorSettings {
            update_interval: Duration::from_secs(self.update_interval_secs),
            include_raw: self.debug_raw,
        }
    }

    pub fn darwin(&self) -> DarwinConfig {
        let config = DarwinConfig::default().with_timeout(self.timeout_secs);
        match &self.darwin_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }

    pub fn transportapi(&self, credentials: PlannerCredentials) -> TransportApiConfig {
        let config = TransportApiConfig::new(credentials).with_timeout(self.timeout_secs);
        match &self.transportapi_base_url {
            Some(url) => config.with_base_url(url),
            None => config,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),
    #[error("Failed to parse config: {0}")]
    Parse(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
