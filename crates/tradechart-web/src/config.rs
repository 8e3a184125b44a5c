use std::net::SocketAddr;
use std::path::PathBuf;

use tradechart_core::{ChartConfig, ConfigError};

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Server settings plus the chart settings it hands to the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directory holding `trade.html`, `trades.html` and other static files.
    pub assets_dir: PathBuf,
    /// Base URL written into trade detail links.
    pub public_url: String,
    pub upload_limit_bytes: usize,
    pub chart: ChartConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            assets_dir: PathBuf::from("assets"),
            public_url: DEFAULT_PUBLIC_URL.to_owned(),
            upload_limit_bytes: DEFAULT_UPLOAD_LIMIT_BYTES,
            chart: ChartConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self {
            chart: ChartConfig::from_lookup(&lookup)?,
            ..Self::default()
        };

        if let Some(value) = get("TRADECHART_BIND") {
            config.bind = value.trim().parse().map_err(|_| ConfigError {
                key: "TRADECHART_BIND",
                value: value.clone(),
            })?;
        }
        if let Some(value) = get("TRADECHART_ASSETS_DIR") {
            config.assets_dir = PathBuf::from(value);
        }
        if let Some(value) = get("TRADECHART_PUBLIC_URL") {
            config.public_url = value.trim().trim_end_matches('/').to_owned();
        }
        if let Some(value) = get("TRADECHART_UPLOAD_LIMIT_BYTES") {
            config.upload_limit_bytes = value.trim().parse().map_err(|_| ConfigError {
                key: "TRADECHART_UPLOAD_LIMIT_BYTES",
                value: value.clone(),
            })?;
        }

        Ok(config)
    }
}
