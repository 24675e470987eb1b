use std::time::Duration;

use webterm_common::Dimensions;

use crate::widget::WidgetError;

use super::TerminalSession;

impl TerminalSession {
    /// Decode one chunk of raw output and write it to the widget.
    ///
    /// A character split across chunks is held back until the rest of it
    /// arrives. Widget failures are returned unchanged.
    pub fn output(&mut self, chunk: &[u8]) -> Result<(), WidgetError> {
        let text = self.decoder.decode(chunk);
        if text.is_empty() {
            return Ok(());
        }
        self.widget.write(&text)
    }

    /// Write a replacement character for any partial character still held
    /// by the decoder. Call once the output stream has ended.
    pub fn flush_output(&mut self) -> Result<(), WidgetError> {
        let tail = self.decoder.finish();
        if tail.is_empty() {
            return Ok(());
        }
        self.widget.write(&tail)
    }

    /// Show `text` in the overlay. `Duration::ZERO` keeps it up until it is
    /// replaced or removed.
    pub fn show_message(&self, text: &str, timeout: Duration) {
        self.overlay.show(text, timeout);
    }

    pub fn remove_message(&self) {
        self.overlay.remove();
    }

    pub fn set_window_title(&self, title: &str) {
        self.host.surface.set_document_title(title);
    }

    /// Call `callback` with every unit of keystroke or paste data.
    pub fn on_input(&self, mut callback: impl FnMut(&str) + 'static) {
        self.widget.on_data(Box::new(move |data: &str| callback(data)));
    }

    /// Call `callback` with `(cols, rows)` whenever the widget's grid size
    /// changes, fits included.
    pub fn on_resize(&self, mut callback: impl FnMut(u16, u16) + 'static) {
        self.widget
            .on_resize(Box::new(move |dims: Dimensions| callback(dims.columns, dims.rows)));
    }
}
