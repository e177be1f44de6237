use crate::error::AppError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use time::UtcOffset;
use tracing::Level;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
/// Indian Standard Time (UTC+05:30).
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub app: AppSection,
    pub logging: LoggingSection,
    #[serde(default)]
    pub catalog: Option<CatalogSettings>,
    #[serde(default)]
    pub server: Option<ServerSection>,
    #[serde(default)]
    pub clock: Option<ClockSection>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSection {
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSection {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogSettings {
    /// JSON temple catalog replacing the built-in one
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSection {
    /// Port to listen on (default: 8080)
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClockSection {
    /// Local offset used for hour/day/month lookups (default: 330, IST)
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_default() -> Result<Config, ConfigError> {
    load_from_path(DEFAULT_CONFIG_PATH)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    Ok(config)
}

impl Config {
    pub fn catalog_path(&self) -> Option<&Path> {
        let path = self.catalog.as_ref()?.path.as_deref()?;
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    }

    /// Returns the server port (default: 8080)
    pub fn server_port(&self) -> u16 {
        self.server
            .as_ref()
            .and_then(|s| s.port)
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    pub fn log_level(&self) -> Result<Level, AppError> {
        Level::from_str(self.logging.level.trim())
            .map_err(|_| AppError::InvalidLogLevel(self.logging.level.clone()))
    }

    pub fn utc_offset(&self) -> Result<UtcOffset, AppError> {
        let minutes = self
            .clock
            .as_ref()
            .and_then(|c| c.utc_offset_minutes)
            .unwrap_or(DEFAULT_UTC_OFFSET_MINUTES);
        UtcOffset::from_whole_seconds(minutes.saturating_mul(60))
            .map_err(|_| AppError::InvalidUtcOffset(minutes))
    }
}
