use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Listen address for the webhook server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

/// Where and how to reach the intent-recognition service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentConfig {
    /// Full URL of the detect-intent endpoint.
    pub url: String,

    /// Optional bearer token sent with every detect request.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Credentials and endpoint for the weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,

    /// Base URL of the provider API, without a trailing slash. Overridden
    /// in tests and for self-hosted gateways.
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [server]
/// host = "0.0.0.0"
/// port = 8080
///
/// [intent]
/// url = "https://intent.example.com/v1/detect"
/// api_key = "..."
///
/// [weather]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub intent: IntentConfig,
    pub weather: WeatherConfig,
}

impl Config {
    /// Load config from the platform config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!(
                "Config file not found: {}.\n\
                 Hint: create it with an [intent] url and a [weather] api_key.",
                path.display()
            ));
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}
