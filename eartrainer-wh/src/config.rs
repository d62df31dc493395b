//! Configuration loading for the webhook service
//!
//! Resolution priority order:
//! 1. Config file named by the `EARTRAINER_CONFIG` environment variable
//! 2. Platform config directory (`~/.config/eartrainer/config.toml` on Linux)
//! 3. Compiled defaults
//!
//! The `PORT` environment variable overrides the configured port afterwards,
//! matching the hosting platform's convention.

use std::path::PathBuf;

use serde::Deserialize;
use tracing::info;

use eartrainer_common::pitch::DEFAULT_AUDIO_BASE_URL;
use eartrainer_common::{Error, Result};

/// Webhook service configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WhConfig {
    /// Bind host
    pub host: String,
    /// Bind port (overridden by the PORT environment variable)
    pub port: u16,
    /// Base URL of the hosted note recordings (must end with `/`)
    pub audio_base_url: String,
}

impl Default for WhConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            audio_base_url: DEFAULT_AUDIO_BASE_URL.to_string(),
        }
    }
}

impl WhConfig {
    /// Load configuration following the priority order above.
    ///
    /// A missing config file falls back to defaults; an unreadable or
    /// malformed file is a [`Error::Config`].
    pub fn load() -> Result<Self> {
        let mut config = match resolve_config_path() {
            Some(path) => {
                info!("Loading config from {}", path.display());
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Cannot read {}: {}", path.display(), e))
                })?;
                toml::from_str(&content).map_err(|e| {
                    Error::Config(format!("Cannot parse {}: {}", path.display(), e))
                })?
            }
            None => Self::default(),
        };

        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|e| Error::Config(format!("Invalid PORT value {:?}: {}", port, e)))?;
        }

        Ok(config)
    }
}

/// Find the config file to load, if any.
fn resolve_config_path() -> Option<PathBuf> {
    // Priority 1: explicit environment variable
    if let Ok(path) = std::env::var("EARTRAINER_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // Priority 2: platform config directory
    let path = dirs::config_dir()?.join("eartrainer").join("config.toml");
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = WhConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.audio_base_url, DEFAULT_AUDIO_BASE_URL);
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config: WhConfig = toml::from_str("port = 9090").unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.audio_base_url, DEFAULT_AUDIO_BASE_URL);
    }

    #[test]
    fn test_full_file() {
        let config: WhConfig = toml::from_str(
            r#"
            host = "127.0.0.1"
            port = 5730
            audio_base_url = "http://localhost:9000/notes/"
            "#,
        )
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 5730);
        assert_eq!(config.audio_base_url, "http://localhost:9000/notes/");
    }
}
