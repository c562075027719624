//! Startup configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use harvest_storage::client::StorageSettings;
use thiserror::Error;

pub const DEFAULT_API_KEY: &str = "default_key";
pub const DEFAULT_ENDPOINT: &str = "https://s3.us-south.cloud-object-storage.appdomain.cloud";
pub const DEFAULT_REGION: &str = "us-south";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const DEFAULT_FILES_DIR: &str = "files";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
/// Five days.
pub const DEFAULT_URL_EXPIRY_SECS: u64 = 432_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub storage: StorageSettings,
    /// Directory holding `fonts/` and the optional `logo.png`.
    pub assets_dir: PathBuf,
    /// Served read-only under `/files`.
    pub files_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub url_expiry: Duration,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"****")
            .field("storage", &self.storage)
            .field("assets_dir", &self.assets_dir)
            .field("files_dir", &self.files_dir)
            .field("bind_addr", &self.bind_addr)
            .field("url_expiry", &self.url_expiry)
            .finish()
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let required = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let api_key = match get("API_KEY") {
            Some(key) => key,
            None => {
                tracing::warn!("API_KEY is not set, falling back to the built-in default key");
                DEFAULT_API_KEY.to_string()
            }
        };

        let storage = StorageSettings {
            endpoint: get("COS_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            region: get("COS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            bucket: required("COS_BUCKET_NAME")?,
            access_key_id: required("COS_HMAC_ACCESS_KEY_ID")?,
            secret_access_key: required("COS_HMAC_SECRET_ACCESS_KEY")?,
            force_path_style: match get("COS_FORCE_PATH_STYLE") {
                Some(raw) => parse_bool("COS_FORCE_PATH_STYLE", &raw)?,
                None => true,
            },
        };

        let bind_raw = get("HARVEST_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
            name: "HARVEST_BIND_ADDR",
            reason: e.to_string(),
        })?;

        let url_expiry = match get("HARVEST_URL_EXPIRY_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        name: "HARVEST_URL_EXPIRY_SECS",
                        reason: e.to_string(),
                    }
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: "HARVEST_URL_EXPIRY_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_URL_EXPIRY_SECS),
        };

        Ok(Self {
            api_key,
            storage,
            assets_dir: PathBuf::from(
                get("HARVEST_ASSETS_DIR").unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()),
            ),
            files_dir: PathBuf::from(
                get("HARVEST_FILES_DIR").unwrap_or_else(|| DEFAULT_FILES_DIR.to_string()),
            ),
            bind_addr,
            url_expiry,
        })
    }
}

fn parse_bool(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            name,
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}
