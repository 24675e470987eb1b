//! Window resize events and `setTimeout` timers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;
use webterm_session::{ListenerId, Scheduler, TimerId, ViewportSignal};

const RESIZE_EVENT: &str = "resize";

/// The window's `resize` event.
pub struct WindowResizeSignal {
    window: Window,
    next_id: Cell<u64>,
    listeners: RefCell<HashMap<ListenerId, Closure<dyn FnMut()>>>,
}

impl WindowResizeSignal {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: Cell::new(0),
            listeners: RefCell::new(HashMap::new()),
        }
    }
}

impl ViewportSignal for WindowResizeSignal {
    fn subscribe(&self, listener: Rc<dyn Fn()>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let closure = Closure::wrap(Box::new(move || listener()) as Box<dyn FnMut()>);
        if let Err(e) = self
            .window
            .add_event_listener_with_callback(RESIZE_EVENT, closure.as_ref().unchecked_ref())
        {
            warn!(error = ?e, "failed to add resize listener");
        }
        self.listeners.borrow_mut().insert(id, closure);
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        let Some(closure) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(RESIZE_EVENT, closure.as_ref().unchecked_ref())
        {
            warn!(error = ?e, "failed to remove resize listener");
        }
    }
}

/// Longest delay `setTimeout` honours; larger values fire at once.
const MAX_DELAY_MS: u32 = i32::MAX as u32;

/// `window.setTimeout` behind the [`Scheduler`] trait.
///
/// A timer is forgotten as soon as it starts running, so clearing it from
/// inside its own callback does nothing.
#[derive(Default)]
pub struct WindowScheduler {
    next_id: Cell<u64>,
    timers: Rc<RefCell<HashMap<TimerId, Timeout>>>,
}

impl WindowScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers armed and not yet fired or cleared.
    pub fn pending(&self) -> usize {
        self.timers.borrow().len()
    }
}

impl Scheduler for WindowScheduler {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let millis = u32::try_from(delay.as_millis())
            .map_or(MAX_DELAY_MS, |ms| ms.min(MAX_DELAY_MS));
        let timers = Rc::downgrade(&self.timers);
        let timeout = Timeout::new(millis, move || {
            let fired = timers.upgrade().and_then(|timers| {
                let mut map = timers.borrow_mut();
                map.remove(&id)
            });
            callback();
            drop(fired);
        });
        self.timers.borrow_mut().insert(id, timeout);
        id
    }

    fn clear_timeout(&self, id: TimerId) {
        // Dropping a `Timeout` clears it.
        let removed = self.timers.borrow_mut().remove(&id);
        drop(removed);
    }
}
