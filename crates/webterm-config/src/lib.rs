//! webterm configuration and preference parsing.
//!
//! Provides the TOML-based session configuration (overlay timing, initial
//! preferences, color merge policy, logging) and the boundary that turns a
//! host's preference bag into typed [`Preference`] values. All config
//! sections use defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use webterm_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod colors;
pub mod preferences;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use preferences::{ColorSlot, CursorStyle, Preference, PreferenceSet, PALETTE_SIZE};
pub use schema::{ColorMerge, WebtermConfig, CONFIG_SCHEMA_VERSION};

use std::path::Path;
use webterm_common::ConfigError;

/// Load config from `path`, or from the platform default location when
/// `path` is `None`.
pub fn load_config(path: Option<&Path>) -> Result<WebtermConfig, ConfigError> {
    match path {
        Some(p) => toml_loader::load_from_path(p),
        None => toml_loader::load_default(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &WebtermConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
