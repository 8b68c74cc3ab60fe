//! # Event Channels
//!
//! The notification mechanism between view-models, coordinators and screens.
//!
//! An `EventChannel<E>` is a list of subscribers. `subscribe()` returns a
//! `Subscription` handle that can be used to remove exactly that subscriber
//! again; `clear()` drops them all.
//!
//! Channels are handles: cloning one yields another handle to the *same*
//! subscriber list. This is how a cell's `on_selected` forwards into its
//! screen's `on_recipe_chosen` without the cell borrowing the screen.
//!
//! Everything here lives on the UI thread, so channels are `!Send`.
//! Emission works on a snapshot of the subscriber list, so a handler may
//! subscribe, unsubscribe or clear the channel it is being called from.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Handler<E> = Rc<dyn Fn(&E)>;

struct Subscribers<E> {
    next_id: u64,
    handlers: Vec<(Subscription, Handler<E>)>,
}

pub struct EventChannel<E> {
    inner: Rc<RefCell<Subscribers<E>>>,
}

impl<E> EventChannel<E> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Subscribers {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    pub fn subscribe(&self, handler: impl Fn(&E) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        let subscription = Subscription(inner.next_id);
        inner.next_id += 1;
        inner.handlers.push((subscription, Rc::new(handler)));
        subscription
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&self, subscription: Subscription) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.handlers.len();
        inner.handlers.retain(|(s, _)| *s != subscription);
        inner.handlers.len() != before
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().handlers.clear();
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }

    /// Calls every subscriber in subscription order. Returns how many were notified.
    pub fn emit(&self, event: &E) -> usize {
        let snapshot: Vec<Handler<E>> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();

        for handler in &snapshot {
            handler(event);
        }
        snapshot.len()
    }
}

impl<E> Clone for EventChannel<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_all_subscribers_in_order() {
        let channel = EventChannel::<u32>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&seen);
        channel.subscribe(move |v| first.borrow_mut().push(("first", *v)));
        let second = Rc::clone(&seen);
        channel.subscribe(move |v| second.borrow_mut().push(("second", *v)));

        assert_eq!(channel.emit(&7), 2);
        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unsubscribe_removes_only_that_subscriber() {
        let channel = EventChannel::<()>::new();
        let hits = Rc::new(Cell::new(0));

        let a = Rc::clone(&hits);
        let sub_a = channel.subscribe(move |_| a.set(a.get() + 1));
        let b = Rc::clone(&hits);
        channel.subscribe(move |_| b.set(b.get() + 10));

        assert!(channel.unsubscribe(sub_a));
        assert!(!channel.unsubscribe(sub_a));
        channel.emit(&());
        assert_eq!(hits.get(), 10);
    }

    #[test]
    fn test_clones_share_subscribers() {
        let channel = EventChannel::<()>::new();
        let handle = channel.clone();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        handle.subscribe(move |_| h.set(h.get() + 1));

        channel.emit(&());
        assert_eq!(hits.get(), 1);
        channel.clear();
        assert_eq!(handle.subscriber_count(), 0);
    }

    #[test]
    fn test_handler_may_clear_its_own_channel() {
        let channel = EventChannel::<()>::new();
        let handle = channel.clone();
        channel.subscribe(move |_| handle.clear());

        assert_eq!(channel.emit(&()), 1);
        assert_eq!(channel.emit(&()), 0);
    }
}
