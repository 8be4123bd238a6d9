use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::Notify;

use crate::framework::ShutdownToken;

/// Unbounded FIFO of pending orders.
///
/// Safe to share between the waiter's task (enqueue) and the cook's task (dequeue). The
/// cook waits on [`OrderQueue::next`], which parks on a [`Notify`] instead of polling.
#[derive(Debug)]
pub struct OrderQueue<T> {
    items: Mutex<VecDeque<Arc<T>>>,
    available: Notify,
    enqueued: AtomicU64,
    dequeued: AtomicU64,
}

impl<T> Default for OrderQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderQueue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            available: Notify::new(),
            enqueued: AtomicU64::new(0),
            dequeued: AtomicU64::new(0),
        }
    }

    fn items(&self) -> MutexGuard<'_, VecDeque<Arc<T>>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends to the tail. Never blocks.
    pub fn enqueue(&self, item: Arc<T>) {
        self.items().push_back(item);
        self.enqueued.fetch_add(1, Ordering::SeqCst);
        self.available.notify_one();
    }

    /// Removes and returns the head, or `None` when empty.
    pub fn dequeue(&self) -> Option<Arc<T>> {
        let item = self.items().pop_front();
        if item.is_some() {
            self.dequeued.fetch_add(1, Ordering::SeqCst);
        }
        item
    }

    /// Waits for the next order. Returns `None` once shutdown is requested.
    pub async fn next(&self, shutdown: &mut ShutdownToken) -> Option<Arc<T>> {
        loop {
            if shutdown.is_shutdown() {
                return None;
            }
            if let Some(item) = self.dequeue() {
                return Some(item);
            }
            tokio::select! {
                _ = self.available.notified() => {}
                _ = shutdown.wait() => return None,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Copy of the pending orders, head first.
    pub fn pending(&self) -> Vec<Arc<T>> {
        self.items().iter().cloned().collect()
    }

    pub fn total_enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::SeqCst)
    }

    pub fn total_dequeued(&self) -> u64 {
        self.dequeued.load(Ordering::SeqCst)
    }
}
