//! Core TOML config loading: read from a string, a path, or the platform default.

use crate::schema::WebtermConfig;
use crate::validation;
use std::path::Path;
use tracing::{info, warn};
use webterm_common::ConfigError;

use super::paths::{create_default_config, default_config_path};

/// Parse config from TOML text.
///
/// Missing fields take their serde defaults. If the parsed config fails
/// validation a warning is logged and the default config is returned.
pub fn load_from_str(content: &str) -> Result<WebtermConfig, ConfigError> {
    let config: WebtermConfig = toml::from_str(content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    if let Err(e) = validation::validate(&config) {
        warn!("config validation warning: {e}");
        warn!("falling back to default config");
        return Ok(WebtermConfig::default());
    }

    Ok(config)
}

/// Load config from a specific TOML file path.
pub fn load_from_path(path: &Path) -> Result<WebtermConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;

    let config = load_from_str(&content)?;
    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// If the file does not exist, creates a default config file and returns defaults.
pub fn load_default() -> Result<WebtermConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(WebtermConfig::default())
        }
        Err(e) => Err(e),
    }
}
