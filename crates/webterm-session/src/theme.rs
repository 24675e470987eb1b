//! Theme assembly from color preferences.
//!
//! A preference update fills two positional buffers, five UI color slots
//! and the sixteen ANSI palette entries, and turns them into one [`Theme`]
//! once every key has been read.

use serde::Serialize;
use serde_json::Value;
use webterm_config::{ColorSlot, PALETTE_SIZE};

/// Number of non-palette color slots.
pub const COLOR_SLOTS: usize = 5;

/// Widget color configuration. Unset entries are left out of the JSON form
/// so the widget keeps its own defaults for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor_accent: Option<String>,
    /// Selection highlight; xterm.js 5 reads it as `selectionBackground`.
    #[serde(
        rename = "selectionBackground",
        skip_serializing_if = "Option::is_none"
    )]
    pub selection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub black: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub green: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yellow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magenta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bright_black: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bright_red: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bright_green: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bright_yellow: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bright_blue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bright_magenta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bright_cyan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bright_white: Option<String>,
}

impl Theme {
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }

    /// The sixteen palette entries in ANSI order.
    pub fn palette(&self) -> [Option<&str>; PALETTE_SIZE] {
        [
            self.black.as_deref(),
            self.red.as_deref(),
            self.green.as_deref(),
            self.yellow.as_deref(),
            self.blue.as_deref(),
            self.magenta.as_deref(),
            self.cyan.as_deref(),
            self.white.as_deref(),
            self.bright_black.as_deref(),
            self.bright_red.as_deref(),
            self.bright_green.as_deref(),
            self.bright_yellow.as_deref(),
            self.bright_blue.as_deref(),
            self.bright_magenta.as_deref(),
            self.bright_cyan.as_deref(),
            self.bright_white.as_deref(),
        ]
    }
}

/// Positional color buffers filled while a preference update is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeBuffers {
    colors: [Option<String>; COLOR_SLOTS],
    palette: [Option<String>; PALETTE_SIZE],
}

impl ThemeBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_color(&mut self, slot: ColorSlot, color: impl Into<String>) {
        self.colors[slot.index()] = Some(color.into());
    }

    pub fn color(&self, slot: ColorSlot) -> Option<&str> {
        self.colors[slot.index()].as_deref()
    }

    /// Replace the whole palette. Positions the override leaves out, or sets
    /// to `None`, end up unset.
    pub fn replace_palette(&mut self, overrides: &[Option<String>]) {
        self.palette = Default::default();
        for (slot, color) in self.palette.iter_mut().zip(overrides) {
            slot.clone_from(color);
        }
    }

    pub fn to_theme(&self) -> Theme {
        let [foreground, background, cursor, cursor_accent, selection] = self.colors.clone();
        let [
            black,
            red,
            green,
            yellow,
            blue,
            magenta,
            cyan,
            white,
            bright_black,
            bright_red,
            bright_green,
            bright_yellow,
            bright_blue,
            bright_magenta,
            bright_cyan,
            bright_white,
        ] = self.palette.clone();

        Theme {
            foreground,
            background,
            cursor,
            cursor_accent,
            selection,
            black,
            red,
            green,
            yellow,
            blue,
            magenta,
            cyan,
            white,
            bright_black,
            bright_red,
            bright_green,
            bright_yellow,
            bright_blue,
            bright_magenta,
            bright_cyan,
            bright_white,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn palette_of(n: usize) -> Vec<Option<String>> {
        (0..n).map(|i| Some(format!("#{i:02x}{i:02x}{i:02x}"))).collect()
    }

    #[test]
    fn empty_buffers_give_empty_theme() {
        let theme = ThemeBuffers::new().to_theme();
        assert_eq!(theme, Theme::default());
        assert_eq!(theme.to_json(), json!({}));
    }

    #[test]
    fn color_slots_map_to_named_fields() {
        let mut buffers = ThemeBuffers::new();
        buffers.set_color(ColorSlot::Foreground, "#fff");
        buffers.set_color(ColorSlot::Background, "#000");
        buffers.set_color(ColorSlot::Cursor, "#f00");
        buffers.set_color(ColorSlot::CursorAccent, "#0f0");
        buffers.set_color(ColorSlot::Selection, "#00f");

        let theme = buffers.to_theme();
        assert_eq!(theme.foreground.as_deref(), Some("#fff"));
        assert_eq!(theme.background.as_deref(), Some("#000"));
        assert_eq!(theme.cursor.as_deref(), Some("#f00"));
        assert_eq!(theme.cursor_accent.as_deref(), Some("#0f0"));
        assert_eq!(theme.selection.as_deref(), Some("#00f"));
        assert!(theme.palette().iter().all(Option::is_none));
    }

    #[test]
    fn palette_maps_in_ansi_order() {
        let mut buffers = ThemeBuffers::new();
        let colors = palette_of(16);
        buffers.replace_palette(&colors);
        let theme = buffers.to_theme();

        let expected: Vec<Option<&str>> = colors.iter().map(|c| c.as_deref()).collect();
        assert_eq!(theme.palette().to_vec(), expected);
        assert_eq!(theme.black.as_deref(), Some("#000000"));
        assert_eq!(theme.white.as_deref(), Some("#070707"));
        assert_eq!(theme.bright_black.as_deref(), Some("#080808"));
        assert_eq!(theme.bright_white.as_deref(), Some("#0f0f0f"));
    }

    #[test]
    fn short_palette_leaves_the_rest_unset() {
        let mut buffers = ThemeBuffers::new();
        buffers.replace_palette(&palette_of(16));
        buffers.replace_palette(&[Some("#111".into()), None, Some("#333".into())]);
        let theme = buffers.to_theme();

        assert_eq!(theme.black.as_deref(), Some("#111"));
        assert_eq!(theme.red, None);
        assert_eq!(theme.green.as_deref(), Some("#333"));
        assert!(theme.palette()[3..].iter().all(Option::is_none));
    }

    #[test]
    fn json_uses_camel_case_and_omits_unset() {
        let mut buffers = ThemeBuffers::new();
        buffers.set_color(ColorSlot::CursorAccent, "#abcdef");
        buffers.set_color(ColorSlot::Selection, "#333");
        let mut palette = vec![None; 16];
        palette[13] = Some("#ff00ff".to_string());
        buffers.replace_palette(&palette);

        assert_eq!(
            buffers.to_theme().to_json(),
            json!({
                "cursorAccent": "#abcdef",
                "selectionBackground": "#333",
                "brightMagenta": "#ff00ff"
            })
        );
    }

    #[test]
    fn color_accessor_reads_slot() {
        let mut buffers = ThemeBuffers::new();
        assert_eq!(buffers.color(ColorSlot::Selection), None);
        buffers.set_color(ColorSlot::Selection, "#444");
        assert_eq!(buffers.color(ColorSlot::Selection), Some("#444"));
    }
}
