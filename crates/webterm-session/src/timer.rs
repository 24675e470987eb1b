//! Deterministic single-threaded timer queue.
//!
//! Time only moves when the owner calls [`TimerQueue::advance`] or
//! [`TimerQueue::advance_to`], so a native event loop can drive it from a
//! monotonic clock and tests can drive it from a virtual one.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::time::Duration;

use tracing::trace;

use crate::host::{Scheduler, TimerId};

type Callback = Box<dyn FnOnce()>;

#[derive(Default)]
struct QueueState {
    now: Duration,
    next_id: u64,
    /// Keyed by (deadline, id) so equal deadlines fire in arming order.
    timers: BTreeMap<(Duration, u64), Callback>,
    deadlines: BTreeMap<u64, Duration>,
}

#[derive(Default)]
pub struct TimerQueue {
    state: RefCell<QueueState>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current queue time.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.state.borrow().timers.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.state.borrow().timers.keys().next().map(|(at, _)| *at)
    }

    /// Deadline of a specific pending timer.
    pub fn deadline_of(&self, id: TimerId) -> Option<Duration> {
        self.state.borrow().deadlines.get(&id.0).copied()
    }

    /// Move time forward by `delta`, firing everything that comes due.
    pub fn advance(&self, delta: Duration) -> usize {
        let target = self.now() + delta;
        self.advance_to(target)
    }

    /// Move time forward to `target`, firing due timers in deadline order.
    ///
    /// Callbacks run with no borrow held, so they may arm or cancel timers;
    /// anything they arm that is due by `target` fires in the same call.
    /// Returns the number of callbacks run.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;

        loop {
            let due = {
                let mut state = self.state.borrow_mut();
                let key = match state.timers.keys().next() {
                    Some(&(at, id)) if at <= target => (at, id),
                    _ => break,
                };
                state.deadlines.remove(&key.1);
                state.now = state.now.max(key.0);
                state.timers.remove(&key)
            };

            if let Some(callback) = due {
                callback();
                fired += 1;
            }
        }

        let mut state = self.state.borrow_mut();
        state.now = state.now.max(target);
        if fired > 0 {
            trace!(fired, now_ms = state.now.as_millis() as u64, "timers fired");
        }
        fired
    }
}

impl Scheduler for TimerQueue {
    fn set_timeout(&self, delay: Duration, callback: Box<dyn FnOnce()>) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        let deadline = state.now + delay;
        state.timers.insert((deadline, id), callback);
        state.deadlines.insert(id, deadline);
        TimerId(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        let mut state = self.state.borrow_mut();
        if let Some(deadline) = state.deadlines.remove(&id.0) {
            state.timers.remove(&(deadline, id.0));
        }
    }
}
