//! Application configuration.
//!
//! Settings are read from `{config_dir}/{environment}.yaml` and handed to
//! constructors as plain immutable values; nothing reads the environment at
//! request time.

use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub payment_broker: PaymentBrokerConfig,
    #[serde(default)]
    pub payment_repository: PaymentRepositoryConfig,
    pub order_api: OrderApiConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Gateway endpoint and the values stamped onto every payment request.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PaymentBrokerConfig {
    pub url: String,
    /// Base URL the gateway calls back; `/payment/{id}/notify` is appended.
    pub notification_url: String,
    pub sponsor_id: String,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PaymentRepositoryConfig {
    /// Path to a RocksDB directory. In-memory storage when absent.
    #[serde(default)]
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OrderApiConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Loads `{config_dir}/{environment}.yaml`.
    pub fn load(config_dir: &Path, environment: &str) -> Result<Self> {
        let path = config_dir.join(format!("{environment}.yaml"));
        tracing::info!(path = %path.display(), "reading config file");
        Self::from_yaml_file(&path)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaymentError::Config(format!(
                "failed to read config file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| PaymentError::Config(format!("invalid config: {e}")))
    }
}
