//! Host preference bags.
//!
//! The host hands the session an open-ended JSON object keyed by
//! preference name. This module is the boundary that turns it into a
//! closed set of [`Preference`] values: recognised keys with a value of the
//! right shape become typed variants, unknown keys are ignored, and values
//! of the wrong shape are rejected. Anything past this point can `match`
//! exhaustively.

mod parse;


use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use webterm_common::PreferenceError;

use crate::colors::validate_color;

pub const KEY_ENABLE_WEBGL: &str = "EnableWebGL";
pub const KEY_FONT_SIZE: &str = "font-size";
pub const KEY_FONT_FAMILY: &str = "font-family";
pub const KEY_WIDTH: &str = "width";
pub const KEY_HEIGHT: &str = "height";
pub const KEY_CURSOR_BLINK: &str = "cursor-blink";
pub const KEY_CURSOR_STYLE: &str = "cursor-style";
pub const KEY_SCROLLBACK_LINES: &str = "scrollback-lines";
pub const KEY_FOREGROUND_COLOR: &str = "foreground-color";
pub const KEY_BACKGROUND_COLOR: &str = "background-color";
pub const KEY_CURSOR_COLOR: &str = "cursor-color";
pub const KEY_CURSOR_ACCENT: &str = "cursor-accent";
pub const KEY_SELECTION_COLOR: &str = "selection-color";
pub const KEY_COLOR_PALETTE_OVERRIDES: &str = "color-palette-overrides";

/// Number of entries in the ANSI palette (8 base + 8 bright).
pub const PALETTE_SIZE: usize = 16;

/// Cursor shape understood by the widget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CursorStyle {
    #[default]
    Block,
    Underline,
    #[serde(alias = "beam")]
    Bar,
}

impl CursorStyle {
    /// Name used by the widget's `cursorStyle` option.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::Underline => "underline",
            Self::Bar => "bar",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "block" => Some(Self::Block),
            "underline" => Some(Self::Underline),
            "bar" | "beam" => Some(Self::Bar),
            _ => None,
        }
    }
}

/// Which of the five theme color slots a color preference fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    Foreground = 0,
    Background = 1,
    Cursor = 2,
    CursorAccent = 3,
    Selection = 4,
}

impl ColorSlot {
    pub const ALL: [ColorSlot; 5] = [
        Self::Foreground,
        Self::Background,
        Self::Cursor,
        Self::CursorAccent,
        Self::Selection,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Foreground => KEY_FOREGROUND_COLOR,
            Self::Background => KEY_BACKGROUND_COLOR,
            Self::Cursor => KEY_CURSOR_COLOR,
            Self::CursorAccent => KEY_CURSOR_ACCENT,
            Self::Selection => KEY_SELECTION_COLOR,
        }
    }
}

/// One recognised preference with a value of the expected shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Preference {
    /// Load the GPU-accelerated renderer add-on when `true`.
    EnableWebGl(bool),
    FontSize(f64),
    FontFamily(String),
    Columns(u16),
    Rows(u16),
    CursorBlink(bool),
    CursorStyle(CursorStyle),
    ScrollbackLines(u32),
    Color(ColorSlot, String),
    /// Positional palette; `None` leaves that slot unset.
    PaletteOverrides(Vec<Option<String>>),
}

impl Preference {
    /// The bag key this preference was read from.
    pub fn key(&self) -> &'static str {
        match self {
            Self::EnableWebGl(_) => KEY_ENABLE_WEBGL,
            Self::FontSize(_) => KEY_FONT_SIZE,
            Self::FontFamily(_) => KEY_FONT_FAMILY,
            Self::Columns(_) => KEY_WIDTH,
            Self::Rows(_) => KEY_HEIGHT,
            Self::CursorBlink(_) => KEY_CURSOR_BLINK,
            Self::CursorStyle(_) => KEY_CURSOR_STYLE,
            Self::ScrollbackLines(_) => KEY_SCROLLBACK_LINES,
            Self::Color(slot, _) => slot.key(),
            Self::PaletteOverrides(_) => KEY_COLOR_PALETTE_OVERRIDES,
        }
    }

    /// Parse a single `(key, value)` entry.
    ///
    /// Returns `Ok(None)` for keys this crate does not know about.
    pub fn from_entry(key: &str, value: &Value) -> Result<Option<Self>, PreferenceError> {
        let invalid = |expected| PreferenceError::InvalidValue {
            key: key.to_string(),
            expected,
        };

        let pref = match key {
            KEY_ENABLE_WEBGL => Self::EnableWebGl(parse::truthy(value)),
            KEY_FONT_SIZE => Self::FontSize(value.as_f64().ok_or_else(|| invalid("a number"))?),
            KEY_FONT_FAMILY => Self::FontFamily(
                value
                    .as_str()
                    .ok_or_else(|| invalid("a string"))?
                    .to_string(),
            ),
            KEY_WIDTH => Self::Columns(
                parse::as_uint(value)
                    .and_then(|n| u16::try_from(n).ok())
                    .ok_or_else(|| invalid("an integer in 0..=65535"))?,
            ),
            KEY_HEIGHT => Self::Rows(
                parse::as_uint(value)
                    .and_then(|n| u16::try_from(n).ok())
                    .ok_or_else(|| invalid("an integer in 0..=65535"))?,
            ),
            KEY_CURSOR_BLINK => {
                Self::CursorBlink(value.as_bool().ok_or_else(|| invalid("a boolean"))?)
            }
            KEY_CURSOR_STYLE => Self::CursorStyle(
                value
                    .as_str()
                    .and_then(CursorStyle::parse)
                    .ok_or_else(|| invalid("one of \"block\", \"underline\", \"bar\""))?,
            ),
            KEY_SCROLLBACK_LINES => Self::ScrollbackLines(
                parse::as_uint(value)
                    .and_then(|n| u32::try_from(n).ok())
                    .ok_or_else(|| invalid("a non-negative integer"))?,
            ),
            KEY_COLOR_PALETTE_OVERRIDES => Self::PaletteOverrides(
                parse::palette(value).ok_or_else(|| invalid("an array of color strings"))?,
            ),
            other => match ColorSlot::ALL.iter().find(|slot| slot.key() == other) {
                Some(&slot) => Self::Color(
                    slot,
                    value
                        .as_str()
                        .ok_or_else(|| invalid("a color string"))?
                        .to_string(),
                ),
                None => return Ok(None),
            },
        };

        Ok(Some(pref))
    }
}

/// Outcome of parsing one preference bag.
#[derive(Debug, Default)]
pub struct PreferenceSet {
    /// Recognised preferences, in the bag's iteration order.
    pub entries: Vec<Preference>,
    /// Keys nobody handles.
    pub ignored: Vec<String>,
    /// Recognised keys whose value had the wrong shape.
    pub rejected: Vec<PreferenceError>,
}

impl PreferenceSet {
    /// Parse a JSON value that must be an object.
    pub fn from_value(value: &Value) -> Result<Self, PreferenceError> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(PreferenceError::NotAnObject(json_type_name(other).into())),
        }
    }

    /// Parse a JSON object, ignoring unknown keys and rejecting bad values.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let mut set = Self::default();

        for (key, value) in map {
            match Preference::from_entry(key, value) {
                Ok(Some(pref)) => {
                    warn_on_unrecognised_colors(&pref);
                    set.entries.push(pref);
                }
                Ok(None) => {
                    debug!(key = %key, "ignoring unknown preference");
                    set.ignored.push(key.clone());
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "preference rejected");
                    set.rejected.push(e);
                }
            }
        }

        set
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preference> {
        self.entries.iter()
    }
}

/// Colors pass through untouched; a warning is all a strange value earns.
fn warn_on_unrecognised_colors(pref: &Preference) {
    match pref {
        Preference::Color(slot, color) if !validate_color(color) => {
            warn!(key = slot.key(), color = %color, "unrecognised color passed through");
        }
        Preference::PaletteOverrides(palette) => {
            for (index, color) in palette.iter().enumerate() {
                if let Some(color) = color.as_deref().filter(|c| !validate_color(c)) {
                    warn!(index, color = %color, "unrecognised palette color passed through");
                }
            }
        }
        _ => {}
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
