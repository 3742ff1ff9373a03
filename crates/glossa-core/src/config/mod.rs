mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::GlossaError;
use defaults::*;

/// Top-level Glossa configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub glossa: GlossaConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub translations: TranslationsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub preference: PreferenceConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlossaConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GlossaConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Static file server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token attached to bundle requests when non-empty.
    #[serde(default)]
    pub token: String,
    /// Serve bundles through the supervisor ingress path.
    #[serde(default)]
    pub supervisor: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: String::new(),
            supervisor: false,
        }
    }
}

/// Supported-language metadata settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationsConfig {
    #[serde(default = "default_metadata_path")]
    pub metadata_path: String,
}

impl Default for TranslationsConfig {
    fn default() -> Self {
        Self {
            metadata_path: default_metadata_path(),
        }
    }
}

/// Settings store config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Backend preference endpoint config.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PreferenceConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Endpoint returning the user's saved language, e.g. `{"language": "fr"}`.
    #[serde(default)]
    pub url: String,
}

/// Expand a leading `~/` to the user's home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, GlossaError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| GlossaError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| GlossaError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
