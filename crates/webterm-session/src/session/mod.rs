//! The terminal session.
//!
//! `TerminalSession` owns one widget for its whole life. It fits the widget
//! to the container on open and on every viewport resize, shows the new size
//! in the overlay, decodes output through a persistent UTF-8 decoder and
//! turns preference bags into widget options plus a single theme update.

use std::rc::Rc;

use webterm_common::SessionId;

use crate::decoder::Utf8StreamDecoder;
use crate::host::{ListenerId, SessionHost};
use crate::overlay::Overlay;
use crate::theme::ThemeBuffers;
use crate::widget::TerminalWidget;

mod handlers;
mod lifecycle;
mod preferences;
mod types;


pub use types::{SessionError, SessionOptions};

pub struct TerminalSession {
    id: SessionId,
    widget: Rc<dyn TerminalWidget>,
    host: SessionHost,
    overlay: Rc<Overlay>,
    decoder: Utf8StreamDecoder,
    /// Viewport resize registration, removed on close.
    listener: Option<ListenerId>,
    options: SessionOptions,
    /// Color buffers from the last preference update.
    theme: ThemeBuffers,
    webgl_loaded: bool,
    closed: bool,
}

impl TerminalSession {
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.shutdown();
    }
}
