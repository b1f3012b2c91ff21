use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Toml(String),
    #[error("no home directory available to place the cache file")]
    NoProjectDirs,
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Toml(value.to_string())
    }
}

/// Client configuration, loaded from a TOML file and overridable by CLI
/// flags and environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    /// Base url of the remote message store.
    pub server: Option<String>,
    /// Signed-in user id.
    pub user: Option<String>,
    /// Optional bearer token carried on every request.
    pub bearer_token: Option<String>,
    /// Where the cache document lives; defaults to the platform data dir.
    pub cache_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads the config file at `path`, or an empty config if it is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Ok(toml::from_str(&raw)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs()?.config_dir().join("skiff.toml"))
    }

    /// Resolves the cache-document path, falling back to the platform data
    /// directory.
    pub fn resolved_cache_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.cache_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("cache.json")),
        }
    }
}

fn project_dirs() -> Result<directories::ProjectDirs, ConfigError> {
    directories::ProjectDirs::from("", "", "skiff").ok_or(ConfigError::NoProjectDirs)
}
