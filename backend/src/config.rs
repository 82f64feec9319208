//! Server configuration: an optional YAML file, then `FINANCE_*` environment
//! overrides on top of the defaults.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const ENV_CONFIG_PATH: &str = "FINANCE_CONFIG";
const ENV_BIND_ADDRESS: &str = "FINANCE_BIND_ADDRESS";
const ENV_STORAGE: &str = "FINANCE_STORAGE";
const ENV_DATABASE_URL: &str = "FINANCE_DATABASE_URL";
const ENV_CORS_ORIGIN: &str = "FINANCE_CORS_ORIGIN";
const ENV_SEED_DEMO_DATA: &str = "FINANCE_SEED_DEMO_DATA";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which storage backend serves the expense port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(()),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Memory => f.write_str("memory"),
            StorageBackend::Sqlite => f.write_str("sqlite"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub storage: StorageBackend,
    pub database_url: String,
    pub cors_origin: String,
    /// Only honoured by the memory backend
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3000)),
            storage: StorageBackend::Sqlite,
            database_url: "sqlite:database.db".to_string(),
            cors_origin: "http://localhost:8080".to_string(),
            seed_demo_data: false,
        }
    }
}

impl ServerConfig {
    /// Load from `path` (if given) and apply overrides from the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(contents: &str) -> Result<Self, serde_yaml::Error> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(contents)
    }

    /// Apply `FINANCE_*` overrides read through `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BIND_ADDRESS) {
            self.bind_address = parse_value(ENV_BIND_ADDRESS, value)?;
        }
        if let Some(value) = lookup(ENV_STORAGE) {
            self.storage = parse_value(ENV_STORAGE, value)?;
        }
        if let Some(value) = lookup(ENV_DATABASE_URL) {
            self.database_url = value;
        }
        if let Some(value) = lookup(ENV_CORS_ORIGIN) {
            self.cors_origin = value;
        }
        if let Some(value) = lookup(ENV_SEED_DEMO_DATA) {
            self.seed_demo_data = parse_value(ENV_SEED_DEMO_DATA, value)?;
        }
        Ok(self)
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
