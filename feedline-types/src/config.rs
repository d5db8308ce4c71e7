//! Configuration types shared by the dispatcher and the store connectors.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::FeedError;

/// Connection parameters for the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Host name or IP address.
    #[serde(alias = "mongo-ip")]
    pub host: String,
    /// TCP port.
    #[serde(alias = "mongo-port")]
    pub port: u16,
    /// Database holding the bar collections.
    pub database: String,
}

impl StoreConfig {
    /// Connection string in `mongodb://host:port` form.
    #[must_use]
    pub fn uri(&self) -> String {
        format!("mongodb://{}:{}", self.host, self.port)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 27017,
            database: "quant".to_string(),
        }
    }
}

/// Bounds for the process-wide cache of downloaded remote files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteCacheConfig {
    /// Directory where downloaded files are stored.
    pub directory: PathBuf,
    /// Maximum number of cached files.
    pub max_entries: u64,
    /// How long a downloaded file stays valid.
    pub ttl: Duration,
}

impl Default for RemoteCacheConfig {
    fn default() -> Self {
        Self {
            directory: std::env::temp_dir().join("feedline-cache"),
            max_entries: 256,
            ttl: Duration::from_secs(60 * 60),
        }
    }
}

/// Global configuration for the source dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Document store connection parameters.
    pub store: StoreConfig,
    /// Remote file cache bounds.
    pub remote_cache: RemoteCacheConfig,
    /// Live trading rather than backtesting; REST readers rate limit when set.
    pub live_mode: bool,
    /// Timeout applied to each HTTP request made by remote transports.
    pub http_timeout: Duration,
}

impl FeedConfig {
    /// Parse a configuration document. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns `FeedError::Config` if `json` is not a valid configuration.
    pub fn from_json_str(json: &str) -> Result<Self, FeedError> {
        serde_json::from_str(json).map_err(|e| FeedError::Config(e.to_string()))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            remote_cache: RemoteCacheConfig::default(),
            live_mode: false,
            http_timeout: Duration::from_secs(30),
        }
    }
}
