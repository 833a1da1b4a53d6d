//! Single-threaded publish/subscribe for input events.
//!
//! Replaces a global "on mouse move" callback: each listener holds a
//! [`Subscription`] token and stops receiving events when it is cancelled or
//! dropped.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::InputEvent;

/// Identifies one subscription on a hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&InputEvent)>;

#[derive(Default)]
struct HubInner {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
    /// Set while `dispatch` has the handler list checked out.
    dispatching: bool,
    /// Cancelled during dispatch; pruned when the list is checked back in.
    cancelled: Vec<SubscriptionId>,
}

impl HubInner {
    /// Take `id`'s handler out of the list. The caller drops it once the hub
    /// is no longer borrowed, since a handler may own other subscriptions.
    fn remove(&mut self, id: SubscriptionId) -> Option<Handler> {
        if let Some(index) = self.handlers.iter().position(|(h, _)| *h == id) {
            return Some(self.handlers.remove(index).1);
        }
        if self.dispatching {
            self.cancelled.push(id);
        }
        None
    }
}

/// Event source the host publishes pointer events on.
///
/// Cloning the hub yields another handle to the same listener list.
#[derive(Clone, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<HubInner>>,
}

impl PointerHub {
    /// Create a hub with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every subsequent event.
    ///
    /// Handlers added during a dispatch first see the next event.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(
        &self,
        handler: impl FnMut(&InputEvent) + 'static,
    ) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_id);
        inner.next_id += 1;
        inner.handlers.push((id, Box::new(handler)));
        Subscription {
            id,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every listener in subscription order.
    ///
    /// Listeners may subscribe or cancel from inside their handler. A nested
    /// dispatch from inside a handler is dropped.
    pub fn dispatch(&self, event: &InputEvent) {
        let mut handlers = {
            let Ok(mut inner) = self.inner.try_borrow_mut() else {
                log::warn!("nested dispatch of {event:?} dropped");
                return;
            };
            if inner.dispatching {
                log::warn!("nested dispatch of {event:?} dropped");
                return;
            }
            inner.dispatching = true;
            std::mem::take(&mut inner.handlers)
        };

        for (id, handler) in &mut handlers {
            if self.inner.borrow().cancelled.contains(id) {
                continue;
            }
            handler(event);
        }

        let removed = {
            let mut inner = self.inner.borrow_mut();
            let cancelled = std::mem::take(&mut inner.cancelled);
            let (mut kept, removed): (Vec<_>, Vec<_>) = handlers
                .into_iter()
                .partition(|(id, _)| !cancelled.contains(id));
            // Anything subscribed during dispatch goes after existing
            // listeners.
            kept.append(&mut inner.handlers);
            inner.handlers = kept;
            inner.dispatching = false;
            removed
        };
        drop(removed);
    }

    /// Number of active listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        let inner = self.inner.borrow();
        inner.handlers.len()
    }
}

/// Handle to one listener. Cancelling or dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    hub: Weak<RefCell<HubInner>>,
}

impl Subscription {
    /// Subscription identifier.
    #[must_use]
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Unsubscribe now.
    pub fn cancel(self) {
        drop(self);
    }

    fn detach(&self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        let removed = match hub.try_borrow_mut() {
            Ok(mut inner) => inner.remove(self.id),
            Err(_) => {
                log::warn!(
                    "subscription {:?} detached while hub busy",
                    self.id
                );
                None
            }
        };
        drop(removed);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}
