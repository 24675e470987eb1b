use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info, warn};
use webterm_common::{Dimensions, SessionId};
use webterm_config::PreferenceSet;

use crate::decoder::Utf8StreamDecoder;
use crate::host::SessionHost;
use crate::overlay::Overlay;
use crate::theme::ThemeBuffers;
use crate::widget::{Addon, TerminalWidget};

use super::types::SessionOptions;
use super::TerminalSession;

impl TerminalSession {
    /// Open `widget` into its container and start tracking viewport resizes.
    ///
    /// The widget must be freshly created for this session; the session
    /// disposes it on close.
    pub fn open(
        widget: Rc<dyn TerminalWidget>,
        host: SessionHost,
        options: SessionOptions,
    ) -> Self {
        let id = SessionId::new();

        widget.load_addon(Addon::Fit);
        if options.web_links {
            widget.load_addon(Addon::WebLinks);
        }
        widget.open();
        if options.focus_on_open {
            widget.focus();
        }

        let overlay = Rc::new(Overlay::new(
            Rc::clone(&host.surface),
            Rc::clone(&host.scheduler),
        ));
        let timeout = options.overlay_timeout;
        fit_and_notify(widget.as_ref(), &overlay, timeout);

        let listener = {
            let widget = Rc::clone(&widget);
            let overlay = Rc::clone(&overlay);
            host.viewport.subscribe(Rc::new(move || {
                fit_and_notify(widget.as_ref(), &overlay, timeout);
            }))
        };

        let mut session = Self {
            id,
            widget,
            host,
            overlay,
            decoder: Utf8StreamDecoder::new(),
            listener: Some(listener),
            options,
            theme: ThemeBuffers::new(),
            webgl_loaded: false,
            closed: false,
        };

        if !session.options.initial_preferences.is_empty() {
            let initial = PreferenceSet::from_map(&session.options.initial_preferences);
            if let Err(e) = session.apply_preferences(&initial) {
                warn!(session = session.id.short(), error = %e, "initial preferences not applied");
            }
        }

        let dims = session.info();
        info!(
            session = session.id.short(),
            cols = dims.columns,
            rows = dims.rows,
            "terminal session opened"
        );
        session
    }

    /// Current grid size.
    pub fn info(&self) -> Dimensions {
        self.widget.dimensions()
    }

    /// Drop input focus, keeping all state.
    pub fn deactivate(&self) {
        self.widget.blur();
    }

    /// Hide the overlay and clear the widget's buffer. Decoder state and
    /// preferences are untouched.
    pub fn reset(&self) {
        self.overlay.remove();
        self.widget.clear();
        debug!(session = self.id.short(), "terminal session reset");
    }

    /// Stop listening for viewport resizes and dispose the widget.
    ///
    /// An auto-hide timer armed before close still fires and hides the
    /// overlay.
    pub fn close(mut self) {
        self.shutdown();
    }

    pub(super) fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Some(listener) = self.listener.take() {
            self.host.viewport.unsubscribe(listener);
        }
        self.widget.dispose();
        info!(session = self.id.short(), "terminal session closed");
    }
}

/// Fit to the container, scroll to the bottom, then show the new size.
pub(super) fn fit_and_notify(widget: &dyn TerminalWidget, overlay: &Overlay, timeout: Duration) {
    widget.fit();
    widget.scroll_to_bottom();
    let dims = widget.dimensions();
    overlay.show(&dims.to_string(), timeout);
    debug!(cols = dims.columns, rows = dims.rows, "fit");
}
