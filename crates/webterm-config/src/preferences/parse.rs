//! Value coercions for preference entries.

use serde_json::Value;
use tracing::debug;

use super::PALETTE_SIZE;

/// Loose truthiness for flag preferences: `true`, any non-zero number and
/// any non-empty string count as set.
pub(super) fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Non-negative integer, accepting floats with no fractional part (`80.0`).
pub(super) fn as_uint(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

/// Positional palette. Non-string entries leave their slot unset; entries
/// past the sixteenth are dropped.
pub(super) fn palette(value: &Value) -> Option<Vec<Option<String>>> {
    let items = value.as_array()?;
    if items.len() > PALETTE_SIZE {
        debug!(
            len = items.len(),
            "palette longer than {PALETTE_SIZE} entries, extra entries dropped"
        );
    }

    Some(
        items
            .iter()
            .take(PALETTE_SIZE)
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}
