//! Full configuration validation.
//!
//! Collects every problem into a single `ConfigError` rather than stopping
//! at the first one.

mod helpers;


use crate::preferences::PreferenceSet;
use crate::schema::WebtermConfig;
use webterm_common::ConfigError;

use helpers::validate_range;

/// Longest accepted overlay auto-hide delay.
pub const MAX_OVERLAY_TIMEOUT_MS: u32 = 60_000;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WebtermConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range(
        &mut errors,
        "overlay.timeout_ms",
        config.overlay.timeout_ms,
        0,
        MAX_OVERLAY_TIMEOUT_MS,
    );
    validate_overlay_class(&mut errors, &config.overlay.class_name);
    validate_initial_preferences(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_overlay_class(errors: &mut Vec<String>, class_name: &str) {
    if class_name.is_empty() || class_name.chars().any(char::is_whitespace) {
        errors.push(format!(
            "overlay.class_name = {class_name:?} must be a single non-empty CSS class"
        ));
    }
}

/// Initial preferences go through the same boundary as host updates;
/// anything it would reject is a config error here.
fn validate_initial_preferences(errors: &mut Vec<String>, config: &WebtermConfig) {
    let set = PreferenceSet::from_map(&config.terminal.initial_preferences);
    for e in &set.rejected {
        errors.push(format!("terminal.initial_preferences: {e}"));
    }
}
