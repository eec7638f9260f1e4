//! Typed publish/subscribe between sibling widgets of one row.
//!
//! Replaces string-named DOM events: every message is a Rust value and every
//! listener is an explicit closure. Single-threaded; handles are cheap `Rc`
//! clones.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Subscription id returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Handler<E> = Rc<dyn Fn(&E)>;

pub struct EventBus<E> {
    inner: Rc<BusInner<E>>,
}

struct BusInner<E> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(Subscription, Handler<E>)>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(BusInner {
                next_id: Cell::new(0),
                handlers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> Subscription {
        let id = Subscription(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .handlers
            .borrow_mut()
            .push((id, Rc::new(handler)));
        id
    }

    pub fn unsubscribe(&self, subscription: Subscription) {
        self.inner
            .handlers
            .borrow_mut()
            .retain(|(id, _)| *id != subscription);
    }

    /// Deliver `event` to every handler in subscription order.
    ///
    /// The handler list is snapshotted first, so handlers may publish or
    /// subscribe while being called. Handlers added during delivery only see
    /// later events.
    pub fn publish(&self, event: &E) {
        let handlers: Vec<Handler<E>> = self
            .inner
            .handlers
            .borrow()
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            handler(event);
        }
    }
}
