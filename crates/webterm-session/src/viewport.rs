//! In-process viewport resize signal.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::host::{ListenerId, ViewportSignal};

/// A resize event source the owner fires by hand.
///
/// Native hosts emit it from whatever tells them the viewport changed
/// (SIGWINCH, a layout pass); tests emit it directly.
#[derive(Default)]
pub struct ResizeSignal {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn()>)>>,
}

impl ResizeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notify every current listener. Listeners may subscribe or
    /// unsubscribe while being notified; changes apply from the next emit.
    pub fn emit(&self) {
        let snapshot: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in snapshot {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ViewportSignal for ResizeSignal {
    fn subscribe(&self, listener: Rc<dyn Fn()>) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}
