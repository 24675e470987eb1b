//! Transient status message layered over the terminal.
//!
//! The overlay node is attached to the container exactly while a message is
//! visible. At most one auto-hide timer is outstanding; arming a new one
//! cancels the previous.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use tracing::trace;

use crate::host::{HostSurface, Scheduler, TimerId};

pub struct Overlay {
    surface: Rc<dyn HostSurface>,
    scheduler: Rc<dyn Scheduler>,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl Overlay {
    pub fn new(surface: Rc<dyn HostSurface>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            surface,
            scheduler,
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Show `text`, hiding it again after `timeout`. A zero timeout keeps the
    /// message up until [`Overlay::remove`] or the next `show`.
    pub fn show(&self, text: &str, timeout: Duration) {
        self.cancel_pending();

        self.surface.set_overlay_text(text);
        if !self.surface.overlay_attached() {
            self.surface.attach_overlay();
        }

        if timeout.is_zero() {
            return;
        }

        let surface = Rc::clone(&self.surface);
        let pending = Rc::clone(&self.pending);
        let id = self.scheduler.set_timeout(
            timeout,
            Box::new(move || {
                pending.set(None);
                detach_if_attached(surface.as_ref());
            }),
        );
        self.pending.set(Some(id));
        trace!(text, timeout_ms = timeout.as_millis() as u64, "overlay shown");
    }

    /// Hide the message now. Safe to call when nothing is shown.
    pub fn remove(&self) {
        self.cancel_pending();
        detach_if_attached(self.surface.as_ref());
    }

    pub fn is_visible(&self) -> bool {
        self.surface.overlay_attached()
    }

    /// The outstanding auto-hide timer, if any.
    pub fn pending_timer(&self) -> Option<TimerId> {
        self.pending.get()
    }

    fn cancel_pending(&self) {
        if let Some(id) = self.pending.take() {
            self.scheduler.clear_timeout(id);
        }
    }
}

fn detach_if_attached(surface: &dyn HostSurface) {
    if surface.overlay_attached() {
        surface.detach_overlay();
    }
}
