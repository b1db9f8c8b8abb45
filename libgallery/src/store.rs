//! Observable state container
//!
//! A `Store<T>` holds one immutable snapshot of `T` at a time. Updates go
//! through [`Store::set_state`], which swaps the snapshot in a single step
//! and then notifies listeners synchronously, in subscription order.
//!
//! The store is single-threaded (`Rc`/`RefCell`), matching the cooperative
//! event loop it runs in. No borrow is held while an updater or a listener
//! runs, so listeners may call `set_state` or unsubscribe re-entrantly.
//! Re-entrant updates are not guarded against loops; that is the caller's
//! responsibility.
//!
//! # Example
//!
//! ```
//! use libgallery::store::Store;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let store = Store::new(0u32);
//! let seen = Rc::new(Cell::new(0));
//! let seen_by_listener = Rc::clone(&seen);
//!
//! let subscription = store.subscribe(move |value: &u32| seen_by_listener.set(*value));
//! store.set_state(|value| value + 1);
//! assert_eq!(seen.get(), 1);
//!
//! subscription.unsubscribe();
//! store.set_state(|value| value + 1);
//! assert_eq!(seen.get(), 1);
//! assert_eq!(*store.get_state(), 2);
//! ```

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;
type ListenerList<T> = RefCell<Vec<(u64, Listener<T>)>>;

pub struct Store<T> {
    state: RefCell<Rc<T>>,
    listeners: Rc<ListenerList<T>>,
    next_id: Cell<u64>,
}

impl<T: 'static> Store<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: RefCell::new(Rc::new(initial)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Current snapshot
    pub fn get_state(&self) -> Rc<T> {
        Rc::clone(&self.state.borrow())
    }

    /// Replace the state with `updater(current)` and notify listeners
    pub fn set_state<F>(&self, updater: F)
    where
        F: FnOnce(&T) -> T,
    {
        let current = self.get_state();
        let next = Rc::new(updater(&current));
        *self.state.borrow_mut() = Rc::clone(&next);
        self.notify(&next);
    }

    /// Register a listener called after every `set_state`
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));

        let listeners: Weak<ListenerList<T>> = Rc::downgrade(&self.listeners);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(listeners) = listeners.upgrade() {
                    listeners.borrow_mut().retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn notify(&self, state: &T) {
        let snapshot: Vec<(u64, Listener<T>)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, listener)| (*id, Rc::clone(listener)))
            .collect();

        for (id, listener) in snapshot {
            // Skip listeners removed earlier in this pass.
            let still_registered = self
                .listeners
                .borrow()
                .iter()
                .any(|(entry, _)| *entry == id);
            if still_registered {
                listener(state);
            }
        }
    }
}

/// Handle returned by [`Store::subscribe`]
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
#[must_use = "keep the subscription to unsubscribe later"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove exactly the listener this handle was created for
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_state_returns_initial() {
        let store = Store::new(String::from("initial"));
        assert_eq!(store.get_state().as_str(), "initial");
    }

    #[test]
    fn test_snapshot_survives_update() {
        let store = Store::new(1);
        let before = store.get_state();
        store.set_state(|n| n * 10);

        assert_eq!(*before, 1);
        assert_eq!(*store.get_state(), 10);
    }

    #[test]
    fn test_unsubscribe_removes_only_its_listener() {
        let store = Store::new(0);
        let first = store.subscribe(|_| {});
        let _second = store.subscribe(|_| {});
        assert_eq!(store.listener_count(), 2);

        first.unsubscribe();
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn test_unsubscribe_after_store_dropped_is_harmless() {
        let store = Store::new(0);
        let subscription = store.subscribe(|_| {});
        drop(store);

        subscription.unsubscribe();
    }

    #[test]
    fn test_reentrant_set_state_from_listener() {
        let store = Rc::new(Store::new(0));
        let weak = Rc::downgrade(&store);

        let _subscription = store.subscribe(move |value: &i32| {
            if *value == 1 {
                if let Some(store) = weak.upgrade() {
                    store.set_state(|v| v + 1);
                }
            }
        });

        store.set_state(|v| v + 1);
        assert_eq!(*store.get_state(), 2);
    }
}
