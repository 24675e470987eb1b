//! Conversions between JS-side values and session types.

use std::time::Duration;

use webterm_common::ConfigError;
use webterm_config::validation::validate;
use webterm_config::WebtermConfig;

/// Overlay timeout from a JS millisecond count. Zero, negative and NaN all
/// mean "no auto-hide".
pub fn timeout_from_millis(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        Duration::ZERO
    } else {
        Duration::from_millis(ms.min(u64::MAX as f64) as u64)
    }
}

/// Bytes from a JS "binary string", one byte per UTF-16 code unit. Code
/// units above 0xFF keep their low byte.
pub fn binary_string_to_bytes(data: &str) -> Vec<u8> {
    data.encode_utf16().map(|unit| (unit & 0xff) as u8).collect()
}

/// Session config from the JSON text of a JS object. `None` or `null`
/// gives the defaults.
pub fn config_from_json(json: Option<&str>) -> Result<WebtermConfig, ConfigError> {
    let config = match json.map(str::trim) {
        None | Some("") | Some("null") | Some("undefined") => WebtermConfig::default(),
        Some(text) => serde_json::from_str(text)
            .map_err(|e| ConfigError::ParseError(format!("invalid config object: {e}")))?,
    };
    validate(&config)?;
    Ok(config)
}
