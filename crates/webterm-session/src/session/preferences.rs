use serde_json::Value;
use tracing::{debug, warn};
use webterm_config::{ColorMerge, Preference, PreferenceSet};

use crate::theme::{Theme, ThemeBuffers};
use crate::widget::{Addon, WidgetError, WidgetOption};

use super::types::SessionError;
use super::TerminalSession;

impl TerminalSession {
    /// Parse a preference bag and apply it.
    ///
    /// Unknown keys are ignored and wrong-typed values are skipped; both are
    /// listed in the returned set. A non-object bag is an error and nothing
    /// is applied. Widget errors stop the update and are returned as is.
    pub fn set_preferences(&mut self, bag: &Value) -> Result<PreferenceSet, SessionError> {
        let set = PreferenceSet::from_value(bag)?;
        self.apply_preferences(&set)?;
        Ok(set)
    }

    /// Apply parsed preferences. Direct options are set as they are read;
    /// the theme is assembled from every color entry and set once at the
    /// end. If the widget rejects an option, options already set stay set
    /// and the theme is left as it was.
    pub fn apply_preferences(&mut self, set: &PreferenceSet) -> Result<(), WidgetError> {
        let mut buffers = match self.options.color_merge {
            ColorMerge::Replace => ThemeBuffers::new(),
            ColorMerge::Cumulative => self.theme.clone(),
        };

        for pref in set.iter() {
            let option = match pref {
                Preference::EnableWebGl(enable) => {
                    if *enable && !self.webgl_loaded {
                        self.widget.load_addon(Addon::WebGl);
                        self.webgl_loaded = true;
                    }
                    continue;
                }
                Preference::Color(slot, color) => {
                    buffers.set_color(*slot, color.as_str());
                    continue;
                }
                Preference::PaletteOverrides(palette) => {
                    buffers.replace_palette(palette);
                    continue;
                }
                Preference::FontSize(size) => WidgetOption::FontSize(*size),
                Preference::FontFamily(family) => WidgetOption::FontFamily(family.clone()),
                Preference::Columns(cols) => WidgetOption::Cols(*cols),
                Preference::Rows(rows) => WidgetOption::Rows(*rows),
                Preference::CursorBlink(blink) => WidgetOption::CursorBlink(*blink),
                Preference::CursorStyle(style) => WidgetOption::CursorStyle(*style),
                Preference::ScrollbackLines(lines) => WidgetOption::Scrollback(*lines),
            };
            if let Err(e) = self.widget.set_option(option) {
                warn!(session = self.id.short(), error = %e, "widget rejected option");
                return Err(e);
            }
        }

        self.widget.set_option(WidgetOption::Theme(buffers.to_theme()))?;
        self.theme = buffers;

        debug!(
            session = self.id.short(),
            applied = set.len(),
            ignored = set.ignored.len(),
            rejected = set.rejected.len(),
            "preferences applied"
        );
        Ok(())
    }

    /// The theme most recently handed to the widget.
    pub fn theme(&self) -> Theme {
        self.theme.to_theme()
    }

    pub fn webgl_loaded(&self) -> bool {
        self.webgl_loaded
    }
}
