use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CURRENT_CONFIG_VERSION: &str = "v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub config_version: String,
    pub host: String,
    /// Port 0 asks the OS for any free port.
    pub port: u16,
}

impl Config {
    pub fn from_raw(raw_config: &str) -> Self {
        match serde_json::from_str::<Config>(raw_config) {
            Ok(config) => config.normalized(),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse config (line {}, column {}): {}, using default",
                    e.line(),
                    e.column(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn normalized(mut self) -> Self {
        self.config_version = CURRENT_CONFIG_VERSION.to_string();

        if self.host.trim().is_empty() {
            self.host = default_host();
        }

        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_version: CURRENT_CONFIG_VERSION.to_string(),
            host: default_host(),
            port: 0,
        }
    }
}

/// Will always return config, falling back to defaults on missing/invalid files.
pub async fn load_config_from_file(config_path: &PathBuf) -> Config {
    match std::fs::read_to_string(config_path) {
        Ok(raw_config) => Config::from_raw(&raw_config),
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                tracing::info!("No config file found, creating one");
            } else {
                tracing::warn!("Failed to read config file: {}", err);
            }
            Config::default()
        }
    }
}

/// Saves the config to the given path
pub async fn save_config_to_file(
    config: &Config,
    config_path: &PathBuf,
) -> Result<(), ConfigError> {
    let normalized = config.clone().normalized();
    let raw_config = serde_json::to_string_pretty(&normalized)?;
    std::fs::write(config_path, raw_config)?;
    Ok(())
}
