//! Named-event publish/subscribe hub.
//!
//! Panels that detect a selection publish it here without knowing who
//! listens. Subscribers run synchronously in registration order; one that
//! returns an error (or panics, where unwinding is available) is logged and
//! skipped, and the rest still run.

use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

/// Event published by the heatmap brush.
pub const YEAR_RANGE_SELECTED: &str = "yearRangeSelected";

/// `None` clears any year filter; `Some((start, end))` has `start <= end`.
pub type YearRangePayload = Option<(i32, i32)>;

/// Order a pair of years so the payload invariant holds.
pub fn year_range(a: i32, b: i32) -> YearRangePayload {
    Some(if a <= b { (a, b) } else { (b, a) })
}

type Callback<P> = Rc<dyn Fn(&P) -> anyhow::Result<()>>;

struct Subscriber<P> {
    handler_id: String,
    callback: Callback<P>,
}

/// Outcome of one `publish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: usize,
}

/// Cheap to clone; clones share the subscriber table.
pub struct Dispatcher<P> {
    events: Rc<RefCell<HashMap<String, Vec<Subscriber<P>>>>>,
}

impl<P> Clone for Dispatcher<P> {
    fn clone(&self) -> Self {
        Self {
            events: Rc::clone(&self.events),
        }
    }
}

impl<P> Default for Dispatcher<P> {
    fn default() -> Self {
        Self {
            events: Rc::new(RefCell::new(HashMap::new())),
        }
    }
}

impl<P> PartialEq for Dispatcher<P> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.events, &other.events)
    }
}

impl<P> Dispatcher<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `event`. Re-using a `handler_id` on the same
    /// event replaces the earlier callback and keeps its position.
    pub fn subscribe<F>(&self, event: &str, handler_id: &str, callback: F)
    where
        F: Fn(&P) -> anyhow::Result<()> + 'static,
    {
        let mut events = self.events.borrow_mut();
        let subscribers = events.entry(event.to_string()).or_default();
        let callback: Callback<P> = Rc::new(callback);
        match subscribers.iter_mut().find(|s| s.handler_id == handler_id) {
            Some(existing) => {
                log::debug!("[GRSM] dispatch: replacing {}.{}", event, handler_id);
                existing.callback = callback;
            }
            None => subscribers.push(Subscriber {
                handler_id: handler_id.to_string(),
                callback,
            }),
        }
    }

    pub fn unsubscribe(&self, event: &str, handler_id: &str) -> bool {
        let mut events = self.events.borrow_mut();
        let Some(subscribers) = events.get_mut(event) else {
            return false;
        };
        let before = subscribers.len();
        subscribers.retain(|s| s.handler_id != handler_id);
        before != subscribers.len()
    }

    pub fn subscriber_count(&self, event: &str) -> usize {
        self.events.borrow().get(event).map_or(0, Vec::len)
    }

    /// Call every subscriber of `event` with `payload`. Never fails.
    pub fn publish(&self, event: &str, payload: &P) -> Delivery {
        // Snapshot first so callbacks may subscribe or publish themselves.
        let snapshot: Vec<(String, Callback<P>)> = self
            .events
            .borrow()
            .get(event)
            .map(|subs| {
                subs.iter()
                    .map(|s| (s.handler_id.clone(), Rc::clone(&s.callback)))
                    .collect()
            })
            .unwrap_or_default();

        let mut delivery = Delivery::default();
        for (handler_id, callback) in snapshot {
            match catch_unwind(AssertUnwindSafe(|| callback(payload))) {
                Ok(Ok(())) => delivery.delivered += 1,
                Ok(Err(e)) => {
                    log::error!("[GRSM] dispatch: {}.{} failed: {:#}", event, handler_id, e);
                    delivery.failed += 1;
                }
                Err(_) => {
                    log::error!("[GRSM] dispatch: {}.{} panicked", event, handler_id);
                    delivery.failed += 1;
                }
            }
        }
        log::debug!(
            "[GRSM] dispatch: {} -> {} ok, {} failed",
            event,
            delivery.delivered,
            delivery.failed
        );
        delivery
    }
}
