//! Terminal session configuration types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How color slots omitted from a preference update are treated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum ColorMerge {
    /// Every update starts from empty buffers; omitted colors become unset.
    #[default]
    Replace,
    /// Omitted colors keep the value from the previous update.
    Cumulative,
}

/// Preference application behavior.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PreferencesConfig {
    pub color_merge: ColorMerge,
}

/// Terminal session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Give the widget input focus right after it opens.
    pub focus_on_open: bool,
    /// Load the link-detection add-on on open.
    pub web_links: bool,
    /// Preference bag applied right after open, same keys as
    /// `set_preferences`.
    pub initial_preferences: Map<String, Value>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            focus_on_open: true,
            web_links: true,
            initial_preferences: Map::new(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_config_defaults() {
        let config = TerminalConfig::default();
        assert!(config.focus_on_open);
        assert!(config.web_links);
        assert!(config.initial_preferences.is_empty());
    }

    #[test]
    fn color_merge_defaults_to_replace() {
        assert_eq!(PreferencesConfig::default().color_merge, ColorMerge::Replace);
    }

    #[test]
    fn color_merge_serialization() {
        let json = serde_json::to_string(&ColorMerge::Cumulative).unwrap();
        assert_eq!(json, "\"cumulative\"");
    }

    #[test]
    fn initial_preferences_from_toml() {
        let toml_str = r##"
web_links = false

[initial_preferences]
font-size = 15
cursor-style = "bar"
color-palette-overrides = ["#000000", "#ff0000"]
"##;
        let config: TerminalConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.web_links);
        assert!(config.focus_on_open);
        assert_eq!(config.initial_preferences["font-size"], 15);
        assert_eq!(config.initial_preferences["cursor-style"], "bar");
        assert_eq!(
            config.initial_preferences["color-palette-overrides"][1],
            "#ff0000"
        );
    }
}
