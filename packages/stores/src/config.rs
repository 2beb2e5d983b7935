//! Store configuration loaded from `config.toml`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::endpoint::{normalize_base, Endpoint};
use crate::error::Error;
use crate::resolver::CACHE_BUST_PARAM;

/// Environment variable overriding [`StoreConfig::api_base`].
pub const API_BASE_ENV: &str = "STOREFRONT_API_BASE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL the resource paths are joined onto.
    pub api_base: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub products_path: String,
    pub users_path: String,
    /// Query key carrying the cache-bust token.
    pub cache_bust_param: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:5000/api/".to_string(),
            timeout_secs: 30,
            products_path: "products".to_string(),
            users_path: "users".to_string(),
            cache_bust_param: CACHE_BUST_PARAM.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the user config file is
    /// read when present and defaults are used otherwise. `STOREFRONT_API_BASE`
    /// wins over whatever the file says.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.is_empty() {
                config.api_base = base;
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let data = fs::read_to_string(path)?;
        let config: StoreConfig = toml::from_str(&data)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.base_url()?;
        if self.timeout_secs == 0 {
            return Err(Error::Config {
                message: "timeout_secs must be greater than zero".to_string(),
            });
        }
        if self.cache_bust_param.is_empty() {
            return Err(Error::Config {
                message: "cache_bust_param must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// `api_base` parsed and normalised to end with `/`.
    pub fn base_url(&self) -> Result<Url, Error> {
        let url = Url::parse(&self.api_base).map_err(|e| Error::Config {
            message: format!("invalid api_base '{}': {}", self.api_base, e),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::Config {
                message: format!("api_base must be http or https, got '{}'", url.scheme()),
            });
        }
        Ok(normalize_base(url))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn products_endpoint(&self) -> Result<Endpoint, Error> {
        Endpoint::collection(&self.base_url()?, &self.products_path)
    }

    pub fn users_endpoint(&self) -> Result<Endpoint, Error> {
        Endpoint::collection(&self.base_url()?, &self.users_path)
    }
}

/// `~/.config/storefront/config.toml` on Linux, the platform equivalent elsewhere.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("storefront").join("config.toml"))
}
