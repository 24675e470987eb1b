//! Overlay (size toast) configuration.

use serde::{Deserialize, Serialize};

/// Default auto-hide delay for the resize overlay, in milliseconds.
pub const DEFAULT_OVERLAY_TIMEOUT_MS: u32 = 2000;

/// Overlay message behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Auto-hide delay for the resize overlay (valid range: 0-60000).
    /// Zero keeps the message up until it is replaced or removed.
    pub timeout_ms: u32,
    /// CSS class assigned to the overlay node.
    pub class_name: String,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_OVERLAY_TIMEOUT_MS,
            class_name: "xterm-overlay".into(),
        }
    }
}
