//! The service counter: where prepared orders are handed over.
//!
//! Orders only become ready when someone at the counter serves them. A [`ServiceCounter`]
//! attached to a cook collects every order the cook starts preparing; [`ServiceCounter::serve_next`]
//! marks the oldest one ready, which lets the cook finish it.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::debug;

use crate::cook::Cook;
use crate::framework::SubscriptionId;
use crate::model::Comestible;

pub struct ServiceCounter<T: Comestible> {
    awaiting: Mutex<VecDeque<Arc<T>>>,
    subscription: OnceLock<SubscriptionId>,
}

impl<T: Comestible> ServiceCounter<T> {
    /// Creates a counter and subscribes it to `cook`'s preparing channel.
    pub fn attach(cook: &Cook<T>) -> Arc<Self> {
        let counter = Arc::new(Self {
            awaiting: Mutex::new(VecDeque::new()),
            subscription: OnceLock::new(),
        });

        let sink = counter.clone();
        let id = cook
            .on_preparing()
            .subscribe(move |item: &Arc<T>| sink.awaiting().push_back(item.clone()));
        let _ = counter.subscription.set(id);
        counter
    }

    /// Stops collecting orders from `cook`. Returns `false` if it was not attached to it.
    pub fn detach(&self, cook: &Cook<T>) -> bool {
        self.subscription
            .get()
            .is_some_and(|id| cook.on_preparing().unsubscribe(*id))
    }

    fn awaiting(&self) -> MutexGuard<'_, VecDeque<Arc<T>>> {
        self.awaiting.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the oldest order in preparation as ready and returns it.
    pub fn serve_next(&self) -> Option<Arc<T>> {
        let item = self.awaiting().pop_front()?;
        item.mark_ready();
        debug!(display_id = item.display_id().unwrap_or("?"), "Served at the counter");
        Some(item)
    }

    /// Orders handed to the counter and not served yet, oldest first.
    pub fn pending(&self) -> Vec<Arc<T>> {
        self.awaiting().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.awaiting().len()
    }

    pub fn is_empty(&self) -> bool {
        self.awaiting().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KitchenConfig;
    use crate::model::Burger;
    use crate::store::MemoryTicketStore;

    fn cook() -> Cook<Burger> {
        Cook::new(&KitchenConfig::default(), Arc::new(MemoryTicketStore::new())).unwrap()
    }

    #[test]
    fn test_serves_in_preparation_order() {
        let cook = cook();
        let counter = ServiceCounter::attach(&cook);

        let first = Arc::new(Burger::with_recipe(false, "burger_1", vec![]));
        let second = Arc::new(Burger::with_recipe(true, "burger_2", vec![]));
        cook.on_preparing().emit(&first);
        cook.on_preparing().emit(&second);
        assert_eq!(counter.len(), 2);

        let served = counter.serve_next().unwrap();
        assert_eq!(served.display_id(), Ok("burger_1"));
        assert!(first.is_ready());
        assert!(!second.is_ready());
        assert_eq!(counter.pending().len(), 1);
    }

    #[test]
    fn test_empty_counter_serves_nothing() {
        let cook = cook();
        let counter = ServiceCounter::attach(&cook);
        assert!(counter.serve_next().is_none());
        assert!(counter.is_empty());
    }

    #[test]
    fn test_detach_stops_collecting() {
        let cook = cook();
        let counter = ServiceCounter::attach(&cook);

        assert!(counter.detach(&cook));
        assert!(!counter.detach(&cook));
        cook.on_preparing()
            .emit(&Arc::new(Burger::with_recipe(false, "burger_3", vec![])));
        assert!(counter.is_empty());
    }
}
