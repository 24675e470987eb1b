//! Regexes backing [`super::color_form`].

use regex::Regex;
use std::sync::LazyLock;

/// Hex color: #RGB, #RGBA, #RRGGBB, or #RRGGBBAA.
pub(super) static HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .unwrap_or_else(|e| panic!("invalid hex color regex: {e}"))
});

/// Functional notation with three or four numeric (optionally percent) arguments.
pub(super) static FUNC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(rgba?|hsla?)\(\s*[0-9.]+%?(deg)?\s*(,\s*[0-9.]+%?\s*){2}(,\s*[0-9]*\.?[0-9]+%?\s*)?\)$",
    )
    .unwrap_or_else(|e| panic!("invalid functional color regex: {e}"))
});

/// Keyword colors. Not checked against the CSS list; any bare word passes.
pub(super) static NAMED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z]+$").unwrap_or_else(|e| panic!("invalid named color regex: {e}"))
});
