use std::time::Duration;

use serde_json::{Map, Value};
use webterm_common::{PreferenceError, WebtermError};
use webterm_config::{ColorMerge, WebtermConfig};

use crate::widget::WidgetError;

/// Failure of a session operation that reaches the widget.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Preference(#[from] PreferenceError),

    #[error(transparent)]
    Widget(#[from] WidgetError),
}

impl From<SessionError> for WebtermError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Preference(e) => WebtermError::Preference(e),
            SessionError::Widget(e) => WebtermError::Session(e.to_string()),
        }
    }
}

/// Per-session behavior, usually derived from [`WebtermConfig`].
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Auto-hide delay for the size overlay shown after each fit.
    pub overlay_timeout: Duration,
    /// Whether colors omitted from a preference update are kept.
    pub color_merge: ColorMerge,
    /// Focus the widget as soon as it opens.
    pub focus_on_open: bool,
    /// Load the link-detection add-on on open.
    pub web_links: bool,
    /// Preference bag applied right after open.
    pub initial_preferences: Map<String, Value>,
}

impl SessionOptions {
    pub fn from_config(config: &WebtermConfig) -> Self {
        Self {
            overlay_timeout: Duration::from_millis(u64::from(config.overlay.timeout_ms)),
            color_merge: config.preferences.color_merge,
            focus_on_open: config.terminal.focus_on_open,
            web_links: config.terminal.web_links,
            initial_preferences: config.terminal.initial_preferences.clone(),
        }
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from_config(&WebtermConfig::default())
    }
}
