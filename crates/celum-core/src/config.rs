use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::credentials::DEFAULT_BASE_URL;

/// HTTP client settings used by [`crate::http::CurlTransport`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    /// Seconds allowed for establishing the TCP/TLS connection.
    pub connect_timeout_secs: u64,
    /// Seconds allowed for a whole transfer (uploads included).
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 300,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Stored API credentials (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialsConfig {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Global configuration loaded from `~/.config/celum/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeConfig {
    /// API credentials; if missing, operations fail with an auth config error.
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
    #[serde(default)]
    pub http: HttpConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("celum")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NodeConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

pub fn load_or_init_at(path: &Path) -> Result<NodeConfig> {
    if !path.exists() {
        let default_cfg = NodeConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: NodeConfig = toml::from_str(&data)?;
    Ok(cfg)
}
