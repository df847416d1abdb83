use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GameError;

const PROJECT_NAME: &str = "game-encyclopedia";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub http: HttpConfig,
    pub steam: SteamConfig,
    pub steamgrid: SteamGridConfig,
    pub screenscraper: ScreenScraperConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_ms: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 15000,
            user_agent: format!("{}/{}", PROJECT_NAME, env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteamConfig {
    pub store_url: String,
    pub api_url: String,
    pub steamspy_url: String,
    pub cache_ttl_secs: u64,
    pub app_list_page_size: u32,
    pub app_list_max_pages: u32,
}

impl Default for SteamConfig {
    fn default() -> Self {
        Self {
            store_url: "https://store.steampowered.com".to_string(),
            api_url: "https://api.steampowered.com".to_string(),
            steamspy_url: "https://steamspy.com/api.php".to_string(),
            cache_ttl_secs: 60 * 60 * 24,
            app_list_page_size: 50000,
            app_list_max_pages: 10,
        }
    }
}

impl SteamConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SteamGridConfig {
    pub base_url: String,
}

impl Default for SteamGridConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.steamgriddb.com/api/v2".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenScraperConfig {
    pub base_url: String,
}

impl Default for ScreenScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.screenscraper.fr/api2".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: format!("{}-mcp-server", PROJECT_NAME),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Some("info".to_string()),
            http: HttpConfig::default(),
            steam: SteamConfig::default(),
            steamgrid: SteamGridConfig::default(),
            screenscraper: ScreenScraperConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try primary location: ~/.config/<project>/<project>.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join(PROJECT_NAME).join(format!("{}.yml", PROJECT_NAME));
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./<project>.yml
        let fallback_config = PathBuf::from(format!("{}.yml", PROJECT_NAME));
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// API credentials, supplied out-of-band through the environment
#[derive(Clone)]
pub struct Credentials {
    pub steam_api_key: String,
    pub steamgrid_api_key: String,
    /// Absent when the retro catalog is not configured; its tools are then not registered
    pub screenscraper: Option<ScreenScraperCredentials>,
}

#[derive(Clone)]
pub struct ScreenScraperCredentials {
    pub dev_id: String,
    pub dev_password: String,
    pub user_id: Option<String>,
    pub user_password: Option<String>,
    pub software_name: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("steam_api_key", &"<redacted>")
            .field("steamgrid_api_key", &"<redacted>")
            .field("screenscraper", &self.screenscraper.is_some())
            .finish()
    }
}

impl Credentials {
    /// Read credentials from the process environment
    pub fn from_env() -> std::result::Result<Self, GameError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary lookup; empty values count as missing
    pub fn from_lookup<F>(lookup: F) -> std::result::Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            non_empty(lookup(key)).ok_or_else(|| {
                GameError::Configuration(format!(
                    "{} is not set. Please set it in your .env file or environment variables.",
                    key
                ))
            })
        };

        let steam_api_key = require("STEAM_API_KEY")?;
        let steamgrid_api_key = require("STEAMGRIDDB_API_KEY")?;

        Ok(Self {
            steam_api_key,
            steamgrid_api_key,
            screenscraper: ScreenScraperCredentials::from_lookup(&lookup),
        })
    }
}

impl ScreenScraperCredentials {
    /// Read the optional retro credentials from the process environment
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Present only when both developer values are set
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_empty(lookup(key));
        let dev_id = get("SCREENSCRAPER_DEV_ID")?;
        let dev_password = get("SCREENSCRAPER_DEV_PASSWORD")?;

        Some(Self {
            dev_id,
            dev_password,
            user_id: get("SCREENSCRAPER_USER_ID"),
            user_password: get("SCREENSCRAPER_USER_PASSWORD"),
            software_name: get("SCREENSCRAPER_SOFTWARE_NAME")
                .unwrap_or_else(|| format!("{}-mcp-server", PROJECT_NAME)),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
