//! Application configuration
//!
//! Precedence: CLI flags > environment variables > config file > defaults.
//! The config file is JSON and lives in the data directory unless overridden
//! with `--config` / `BEACON_CONFIG`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, APP_NAME, CONFIG_FILE_NAME, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_HOST,
    DEFAULT_PORT, ENV_CACHE_MAX_ENTRIES, ENV_DATA_DIR,
};

/// Server bind configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Cache tuning
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration, applying CLI overrides on top
    pub fn load(cli: &CliConfig) -> Result<Self> {
        let mut config = match Self::config_file_path(cli) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        if let Some(host) = &cli.host {
            config.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            config.server.port = port;
        }
        if let Ok(max) = std::env::var(ENV_CACHE_MAX_ENTRIES)
            && let Ok(max) = max.parse::<u64>()
        {
            config.cache.max_entries = max;
        }

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Resolve the config file path: explicit flag, then data directory default
    fn config_file_path(cli: &CliConfig) -> Option<PathBuf> {
        if let Some(path) = &cli.config {
            return Some(path.clone());
        }
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            return Some(PathBuf::from(dir).join(CONFIG_FILE_NAME));
        }
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.data_dir().join(CONFIG_FILE_NAME))
            .or_else(|| {
                std::env::current_dir()
                    .ok()
                    .map(|cwd| cwd.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
            })
    }
}

/// True when the host binds every interface (affects banner display)
pub fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}
