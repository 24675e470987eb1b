//! CSS color recognition for preference values.
//!
//! Colors are handed to the widget verbatim; this module only decides
//! whether a value looks like something a browser will understand so the
//! caller can log a warning for the ones that probably won't.

mod parse;


use parse::{FUNC_RE, HEX_RE, NAMED_RE};

/// Recognised shape of a CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorForm {
    /// `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`.
    Hex,
    /// `rgb()`, `rgba()`, `hsl()` or `hsla()`.
    Function,
    /// A bare keyword such as `red` or `transparent`.
    Named,
}

/// Classify a color string, or `None` if it matches no known form.
pub fn color_form(s: &str) -> Option<ColorForm> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if s.starts_with('#') {
        return HEX_RE.is_match(s).then_some(ColorForm::Hex);
    }
    if FUNC_RE.is_match(s) {
        return Some(ColorForm::Function);
    }
    NAMED_RE.is_match(s).then_some(ColorForm::Named)
}

/// Validate that a string is a recognized color format.
pub fn validate_color(s: &str) -> bool {
    color_form(s).is_some()
}
