//! Host-side collaborators: the container surface, the viewport resize
//! signal, and the timer source.
//!
//! Everything here is single-threaded. Callbacks are `'static` closures
//! owned by the implementor and are never required to be `Send`.

use std::rc::Rc;
use std::time::Duration;

/// The container the terminal renders into, plus the document around it.
pub trait HostSurface {
    /// Replace the overlay node's text content.
    fn set_overlay_text(&self, text: &str);

    /// Append the overlay node to the container.
    fn attach_overlay(&self);

    /// Remove the overlay node from the container.
    fn detach_overlay(&self);

    /// Whether the overlay node's parent is currently the container.
    fn overlay_attached(&self) -> bool;

    fn set_document_title(&self, title: &str);
}

/// Registration handle returned by [`ViewportSignal::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Source of viewport (window) resize notifications.
pub trait ViewportSignal {
    fn subscribe(&self, listener: Rc<dyn Fn()>) -> ListenerId;

    /// Remove a listener. Unknown ids are ignored.
    fn unsubscribe(&self, id: ListenerId);
}

/// Handle for a pending single-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Single-shot timers.
pub trait Scheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId;

    /// Cancel a pending timer. Ids that already fired or were cancelled are
    /// ignored.
    fn clear_timeout(&self, id: TimerId);
}

/// The three host collaborators a session needs, bundled for construction.
#[derive(Clone)]
pub struct SessionHost {
    pub surface: Rc<dyn HostSurface>,
    pub viewport: Rc<dyn ViewportSignal>,
    pub scheduler: Rc<dyn Scheduler>,
}

impl SessionHost {
    pub fn new(
        surface: Rc<dyn HostSurface>,
        viewport: Rc<dyn ViewportSignal>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        Self {
            surface,
            viewport,
            scheduler,
        }
    }
}
