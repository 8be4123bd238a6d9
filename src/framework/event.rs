//! Synchronous one-to-many notification channels.
//!
//! An [`Event`] is a list of registered callbacks. Emitting calls each callback in
//! registration order, on the emitting task, before `emit` returns. Callbacks run
//! outside the registry lock, so a callback may subscribe or unsubscribe others.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::trace;

/// A registered observer callback.
pub type Callback<A> = Arc<dyn Fn(&A) + Send + Sync>;

/// Handle returned by [`Event::subscribe`], used to remove the callback again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A named notification channel carrying payloads of type `A`.
pub struct Event<A: ?Sized> {
    name: &'static str,
    next_id: AtomicU64,
    subscribers: RwLock<Vec<(SubscriptionId, Callback<A>)>>,
}

impl<A: ?Sized> Event<A> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: AtomicU64::new(1),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Registers `callback` and returns its subscription handle.
    pub fn subscribe(&self, callback: impl Fn(&A) + Send + Sync + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        trace!(event = self.name, ?id, "Subscribed");
        id
    }

    /// Removes a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        before != subscribers.len()
    }

    pub fn len(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delivers `payload` to every subscriber and returns how many were called.
    pub fn emit(&self, payload: &A) -> usize {
        let callbacks: Vec<Callback<A>> = self
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();

        for callback in &callbacks {
            callback(payload);
        }
        callbacks.len()
    }
}

impl<A: ?Sized> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("subscribers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_emit_in_registration_order() {
        let event = Event::<u64>::new("delay");
        let seen = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let seen = seen.clone();
            event.subscribe(move |tick: &u64| seen.lock().unwrap().push((tag, *tick)));
        }

        assert_eq!(event.emit(&7), 3);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("first", 7), ("second", 7), ("third", 7)]
        );
    }

    #[test]
    fn test_emit_without_subscribers() {
        let event = Event::<str>::new("empty");
        assert!(event.is_empty());
        assert_eq!(event.emit("nobody listens"), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let event = Event::<u64>::new("delay");
        let calls = Arc::new(AtomicU64::new(0));

        let counter = calls.clone();
        let id = event.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        event.emit(&0);

        assert!(event.unsubscribe(id));
        assert!(!event.unsubscribe(id));
        event.emit(&1);

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(event.len(), 0);
    }

    #[test]
    fn test_callback_may_subscribe_during_emit() {
        let event = Arc::new(Event::<u64>::new("nested"));
        let inner = event.clone();
        event.subscribe(move |_| {
            inner.subscribe(|_| {});
        });

        assert_eq!(event.emit(&0), 1);
        assert_eq!(event.len(), 2);
    }
}
