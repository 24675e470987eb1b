//! Configuration schema types for webterm.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod overlay;
mod system;
mod terminal;

pub use overlay::*;
pub use system::*;
pub use terminal::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct WebtermConfig {
    pub overlay: OverlayConfig,
    pub terminal: TerminalConfig,
    pub preferences: PreferencesConfig,
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config: WebtermConfig = toml::from_str("").unwrap();
        assert_eq!(config.overlay.timeout_ms, DEFAULT_OVERLAY_TIMEOUT_MS);
        assert_eq!(config.preferences.color_merge, ColorMerge::Replace);
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn sections_parse_independently() {
        let config: WebtermConfig = toml::from_str(
            r#"
[preferences]
color_merge = "cumulative"

[logging]
level = "trace"
"#,
        )
        .unwrap();
        assert_eq!(config.preferences.color_merge, ColorMerge::Cumulative);
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert!(config.terminal.focus_on_open);
    }
}
