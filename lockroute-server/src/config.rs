//! Server configuration, read from a TOML file and overridden from the
//! command line.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lockroute_core::loading::overpass::{FETCH_TIMEOUT, OVERPASS_URL};
use lockroute_core::{BoundingBox, Settings, SettingsPatch};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Maximum number of requests handled at once
    pub concurrency_limit: usize,
    pub overpass: OverpassConfig,
    /// Settings a new planning session starts with
    pub planner: Settings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OverpassConfig {
    pub url: String,
    pub timeout_secs: u64,
    /// Area to query at startup, without waiting for a client viewport
    pub initial_bbox: Option<BoundingBox>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            request_timeout_secs: 30,
            concurrency_limit: 256,
            overpass: OverpassConfig::default(),
            planner: Settings::default(),
        }
    }
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: OVERPASS_URL.to_string(),
            timeout_secs: FETCH_TIMEOUT.as_secs(),
            initial_bbox: None,
        }
    }
}

impl ServerConfig {
    /// Reads the config file at `path`, or returns defaults when there is none
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        if self.concurrency_limit == 0 {
            return Err(ConfigError::Invalid(
                "concurrency_limit must be positive".to_string(),
            ));
        }
        if self.overpass.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "overpass.timeout_secs must be positive".to_string(),
            ));
        }

        let planner = SettingsPatch {
            boat_speed_kmh: Some(self.planner.boat_speed_kmh),
            lock_transit_min: Some(self.planner.lock_transit_min),
        };
        planner
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("planner: {e}")))?;

        if let Some(bbox) = &self.overpass.initial_bbox {
            bbox.validate()
                .map_err(|e| ConfigError::Invalid(format!("overpass.initial_bbox: {e}")))?;
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn overpass_timeout(&self) -> Duration {
        Duration::from_secs(self.overpass.timeout_secs)
    }
}
