//! Application configuration.
//!
//! Loaded with the usual priority: explicit `--config` path, then the
//! `MEDIAMUSE_CONFIG` env var, then `~/.mediamuse/config.toml` if it
//! exists, then built-in defaults. Secrets can always be supplied via
//! env (`MEDIAMUSE_API_KEY`, `MEDIAMUSE_LIBRARY_TOKEN`) instead of the
//! file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::MuseError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
}

/// Chat-completion endpoint settings. No endpoint means "no model
/// configured": recommendation and interpretation degrade gracefully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default = "default_model_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            name: default_model_name(),
            timeout_secs: default_model_timeout_secs(),
        }
    }
}

/// Library server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_library_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            timeout_secs: default_library_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_concurrent_sections")]
    pub max_concurrent_sections: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_concurrent_sections: default_max_concurrent_sections(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendConfig {
    /// Corrective retries after the first attempt; total model calls
    /// are `max_retries + 1`.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            max_results: default_max_results(),
        }
    }
}

fn default_model_name() -> String {
    "gpt-4o-mini".to_string()
}

fn default_model_timeout_secs() -> u64 {
    60
}

fn default_library_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> usize {
    200
}

fn default_max_concurrent_sections() -> usize {
    4
}

fn default_max_retries() -> u32 {
    2
}

fn default_max_results() -> usize {
    10
}

impl AppConfig {
    /// Load configuration, see module docs for the lookup order.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, MuseError> {
        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("MEDIAMUSE_CONFIG").ok().map(PathBuf::from))
            .or_else(|| {
                let default = dirs::home_dir()?.join(".mediamuse").join("config.toml");
                default.exists().then_some(default)
            });

        let mut config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    MuseError::Config(format!("cannot read {}: {e}", path.display()))
                })?;
                let config: AppConfig = toml::from_str(&contents).map_err(|e| {
                    MuseError::Config(format!("cannot parse {}: {e}", path.display()))
                })?;
                info!("Loaded config from {}", path.display());
                config
            }
            None => {
                info!("No config file found, using defaults");
                AppConfig::default()
            }
        };

        if let Ok(key) = std::env::var("MEDIAMUSE_API_KEY") {
            config.model.api_key = Some(key);
        }
        if let Ok(token) = std::env::var("MEDIAMUSE_LIBRARY_TOKEN") {
            config.library.token = Some(token);
        }

        Ok(config)
    }
}
