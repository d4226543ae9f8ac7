use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{from_slice, to_string_pretty};
use strum_macros::{Display, EnumString, IntoStaticStr};
use url::Url;

use super::error::ConfigError;
use crate::view_model::PostId;

const CONFIG_PATH: &str = "config.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Configuration

/// Where the API lives and how to talk to it. Built once at startup and
/// handed to `Model::new`; nothing reads it from global state.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Config {
    /// Base of the REST API, e.g. `https://example.org/wp-json/wp/v2/`
    pub endpoint: Url,
    /// Sent as `X-WP-Nonce` on every request when set
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page size for comment listings, server default when `None`
    #[serde(default)]
    pub per_page: Option<u32>,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint: crate::helper::normalize_endpoint(endpoint),
            nonce: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            per_page: None,
        }
    }

    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `config.json` in the platform specific configuration folder
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        use directories_next::ProjectDirs;
        let dirs =
            ProjectDirs::from("org", "wp-comments", "wp-comments").ok_or(ConfigError::NoConfigDirectory)?;
        Ok(dirs.config_dir().join(CONFIG_PATH))
    }

    /// Returns `None` if there is no file at `path` yet
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let data = std::fs::read(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: Config = from_slice(&data).map_err(|source| ConfigError::Format {
            path: path.display().to_string(),
            source,
        })?;
        config.endpoint = crate::helper::normalize_endpoint(config.endpoint);
        Ok(Some(config))
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let io_error = |source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
        }
        let data = to_string_pretty(self).map_err(|source| ConfigError::Format {
            path: path.display().to_string(),
            source,
        })?;
        std::fs::write(path, data).map_err(io_error)?;
        Ok(())
    }
}

// Query Types

#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

/// Query string for the comments collection
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Query {
    pub post: PostId,
    pub order: Order,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

impl Query {
    /// Oldest first, which is how comments under a post are displayed
    pub fn for_post(post: PostId) -> Self {
        Self {
            post,
            order: Order::Asc,
            per_page: None,
        }
    }

    pub fn per_page(mut self, per_page: Option<u32>) -> Self {
        self.per_page = per_page;
        self
    }
}
