//! The terminal widget collaborator.
//!
//! The widget owns escape-sequence interpretation and cell rendering; the
//! session only drives it through this trait. Methods take `&self` because
//! the widget emits data/resize events synchronously from inside calls such
//! as `fit`, and those events may reach back into the session.

use serde_json::{json, Value};
use webterm_common::Dimensions;
use webterm_config::CursorStyle;

use crate::theme::Theme;

/// Optional widget capabilities loaded by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addon {
    /// Recomputes cols/rows from the container's pixel size.
    Fit,
    /// Turns URLs in the output into clickable links.
    WebLinks,
    /// GPU-accelerated renderer.
    WebGl,
}

/// A single named option on the widget's option surface.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetOption {
    FontSize(f64),
    FontFamily(String),
    Cols(u16),
    Rows(u16),
    CursorBlink(bool),
    CursorStyle(CursorStyle),
    Scrollback(u32),
    Theme(Theme),
}

impl WidgetOption {
    /// Option name as the widget spells it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FontSize(_) => "fontSize",
            Self::FontFamily(_) => "fontFamily",
            Self::Cols(_) => "cols",
            Self::Rows(_) => "rows",
            Self::CursorBlink(_) => "cursorBlink",
            Self::CursorStyle(_) => "cursorStyle",
            Self::Scrollback(_) => "scrollback",
            Self::Theme(_) => "theme",
        }
    }

    /// Option value as JSON, ready to hand to a JS widget.
    pub fn value(&self) -> Value {
        match self {
            Self::FontSize(size) => json!(size),
            Self::FontFamily(family) => json!(family),
            Self::Cols(cols) => json!(cols),
            Self::Rows(rows) => json!(rows),
            Self::CursorBlink(blink) => json!(blink),
            Self::CursorStyle(style) => json!(style.as_str()),
            Self::Scrollback(lines) => json!(lines),
            Self::Theme(theme) => theme.to_json(),
        }
    }
}

/// Failure reported by the widget. The session never handles these; they
/// go straight back to whoever called it.
#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("terminal widget has been disposed")]
    Disposed,

    #[error("terminal widget write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("terminal widget error: {0}")]
    Host(String),
}

/// Receives each unit of keystroke or paste data.
pub type DataCallback = Box<dyn FnMut(&str)>;

/// Receives the widget's new grid size.
pub type ResizeCallback = Box<dyn FnMut(Dimensions)>;

/// Opaque terminal-rendering component bound to a host container.
pub trait TerminalWidget {
    fn load_addon(&self, addon: Addon);

    /// Attach the widget to the container it was created for.
    fn open(&self);

    fn focus(&self);

    fn blur(&self);

    /// Run the fit add-on against the container's current pixel size.
    fn fit(&self);

    fn scroll_to_bottom(&self);

    fn dimensions(&self) -> Dimensions;

    fn write(&self, text: &str) -> Result<(), WidgetError>;

    /// Drop scrollback and visible buffer contents.
    fn clear(&self);

    /// Set one option. Errors thrown by the widget come back unchanged.
    fn set_option(&self, option: WidgetOption) -> Result<(), WidgetError>;

    fn on_data(&self, callback: DataCallback);

    /// Fires on every grid size change, whatever caused it.
    fn on_resize(&self, callback: ResizeCallback);

    fn dispose(&self);
}
