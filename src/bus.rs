//! Single-threaded publish/subscribe channel between controllers.
//!
//! The preference controller publishes view-mode changes; the horizontal
//! scroll controller subscribes. Subscriptions are RAII guards: dropping one
//! unsubscribes, so a controller's teardown releases its interest simply by
//! dropping its fields.

#[cfg(test)]
#[path = "bus_test.rs"]
mod bus_test;

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::prefs::ViewMode;

type Handler<T> = Rc<dyn Fn(T)>;

struct Inner<T> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, Handler<T>)>>,
}

/// Cloneable handle to a shared subscriber list.
pub struct Bus<T> {
    inner: Rc<Inner<T>>,
}

/// Bus carrying post-list view-mode changes.
pub type ViewModeBus = Bus<ViewMode>;

impl<T> Clone for Bus<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T> Default for Bus<T> {
    fn default() -> Self {
        Self { inner: Rc::new(Inner { next_id: Cell::new(0), handlers: RefCell::new(Vec::new()) }) }
    }
}

impl<T> std::fmt::Debug for Bus<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus").field("subscribers", &self.subscriber_count()).finish()
    }
}

impl<T: Copy + 'static> Bus<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler`. It runs for every publish until the returned
    /// guard is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, handler: impl Fn(T) + 'static) -> Subscription<T> {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.handlers.borrow_mut().push((id, Rc::new(handler)));
        Subscription { id, bus: Rc::downgrade(&self.inner) }
    }

    /// Deliver `value` to every current subscriber in subscription order.
    ///
    /// The handler list is snapshotted first, so handlers may subscribe or
    /// drop subscriptions while being notified.
    pub fn publish(&self, value: T) {
        let handlers: Vec<Handler<T>> = self.inner.handlers.borrow().iter().map(|(_, h)| Rc::clone(h)).collect();
        for handler in handlers {
            handler(value);
        }
    }
}

impl<T> Bus<T> {
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.borrow().len()
    }
}

/// Guard returned by [`Bus::subscribe`].
pub struct Subscription<T> {
    id: u64,
    bus: Weak<Inner<T>>,
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            inner.handlers.borrow_mut().retain(|(id, _)| *id != self.id);
        }
    }
}
