//! The waiter: the producing side of the kitchen.
//!
//! While enabled, the waiter takes one order per cadence and hands it to every subscriber of
//! [`Waiter::on_order`]. It has no queue of its own; with nobody subscribed, no order is taken.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, trace};

use crate::framework::{Event, Lifecycle, ShutdownToken};
use crate::model::Comestible;

/// Builds a fresh, not yet started order item.
pub type OrderFactory<T> = Box<dyn Fn() -> T + Send + Sync>;

struct WaiterShared<T: Comestible> {
    cadence: Duration,
    factory: OrderFactory<T>,
    on_order: Event<Arc<T>>,
    orders_taken: AtomicU64,
}

impl<T: Comestible> WaiterShared<T> {
    async fn run(self: Arc<Self>, mut shutdown: ShutdownToken) {
        info!(cadence_ms = self.cadence.as_millis() as u64, "Waiter taking orders");

        while !shutdown.is_shutdown() {
            self.take_order();
            if !shutdown.sleep(self.cadence).await {
                break;
            }
        }

        info!(
            orders_taken = self.orders_taken.load(Ordering::SeqCst),
            "Waiter off duty"
        );
    }

    /// Builds one order and delivers it synchronously to every subscriber.
    fn take_order(&self) -> Option<Arc<T>> {
        if self.on_order.is_empty() {
            trace!("Nobody to hand the order to, skipping");
            return None;
        }

        let item = Arc::new((self.factory)());
        item.begin_preparation();

        let delivered = self.on_order.emit(&item);
        let taken = self.orders_taken.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(
            display_id = item.display_id().unwrap_or("?"),
            delivered, taken, "Order taken"
        );
        Some(item)
    }
}

/// Background worker that produces a new order item at a fixed cadence.
pub struct Waiter<T: Comestible> {
    shared: Arc<WaiterShared<T>>,
    lifecycle: Lifecycle,
}

impl<T: Comestible + Default> Waiter<T> {
    /// Creates a waiter producing `T::default()` orders.
    pub fn new(cadence: Duration) -> Self {
        Self::with_factory(cadence, T::default)
    }
}

impl<T: Comestible> Waiter<T> {
    /// Creates a waiter producing orders from `factory`.
    pub fn with_factory(cadence: Duration, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            shared: Arc::new(WaiterShared {
                cadence,
                factory: Box::new(factory),
                on_order: Event::new("new_order"),
                orders_taken: AtomicU64::new(0),
            }),
            lifecycle: Lifecycle::new("waiter"),
        }
    }

    /// Channel notified with every new order, already started.
    pub fn on_order(&self) -> &Event<Arc<T>> {
        &self.shared.on_order
    }

    pub fn cadence(&self) -> Duration {
        self.shared.cadence
    }

    /// Orders delivered to subscribers since construction.
    pub fn orders_taken(&self) -> u64 {
        self.shared.orders_taken.load(Ordering::SeqCst)
    }

    pub fn is_enabled(&self) -> bool {
        self.lifecycle.is_running()
    }

    /// Starts taking orders. Returns `false` if the waiter was already working.
    pub async fn enable(&self) -> bool {
        let shared = self.shared.clone();
        self.lifecycle.start(|shutdown| shared.run(shutdown)).await
    }

    /// Stops taking orders and waits for the current cycle to end.
    /// Returns `false` if the waiter was not working.
    pub async fn disable(&self) -> bool {
        self.lifecycle.stop().await
    }

    pub async fn set_enabled(&self, enabled: bool) -> bool {
        if enabled {
            self.enable().await
        } else {
            self.disable().await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Burger;
    use std::sync::Mutex;
    use tokio::time::Instant;

    fn collecting(waiter: &Waiter<Burger>) -> Arc<Mutex<Vec<Arc<Burger>>>> {
        let orders = Arc::new(Mutex::new(Vec::new()));
        let sink = orders.clone();
        waiter
            .on_order()
            .subscribe(move |item: &Arc<Burger>| sink.lock().unwrap().push(item.clone()));
        orders
    }

    #[tokio::test(start_paused = true)]
    async fn test_takes_one_order_per_cadence() {
        let waiter = Waiter::<Burger>::new(Duration::from_secs(5));
        let orders = collecting(&waiter);

        assert!(waiter.enable().await);
        tokio::time::sleep(Duration::from_secs(12)).await;
        assert!(waiter.disable().await);

        // Taken at t=0, t=5 and t=10.
        let orders = orders.lock().unwrap();
        assert_eq!(orders.len(), 3);
        assert_eq!(waiter.orders_taken(), 3);
        assert!(orders.iter().all(|item| item.display_id().is_ok()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_disable_is_bounded_by_one_interval() {
        let waiter = Waiter::<Burger>::new(Duration::from_secs(5));
        let _orders = collecting(&waiter);

        waiter.enable().await;
        tokio::time::sleep(Duration::from_secs(1)).await;

        let before = Instant::now();
        waiter.disable().await;
        assert!(before.elapsed() < waiter.cadence());
        assert!(!waiter.is_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_without_subscribers_no_order_is_taken() {
        let waiter = Waiter::<Burger>::new(Duration::from_secs(5));

        waiter.enable().await;
        tokio::time::sleep(Duration::from_secs(11)).await;
        waiter.disable().await;

        assert_eq!(waiter.orders_taken(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enable_twice_keeps_single_run() {
        let waiter = Waiter::<Burger>::new(Duration::from_secs(5));
        let orders = collecting(&waiter);

        assert!(waiter.set_enabled(true).await);
        assert!(!waiter.set_enabled(true).await);
        tokio::time::sleep(Duration::from_secs(7)).await;
        assert!(waiter.set_enabled(false).await);
        assert!(!waiter.set_enabled(false).await);

        assert_eq!(orders.lock().unwrap().len(), 2);
        assert_eq!(waiter.on_order().len(), 1);
    }

    #[tokio::test]
    async fn test_factory_orders_are_started_before_delivery() {
        let waiter = Waiter::with_factory(Duration::from_secs(5), Burger::double);
        let orders = collecting(&waiter);

        let item = waiter.shared.take_order().unwrap();
        assert!(item.is_double());
        assert!(item.cost().is_some());
        assert_eq!(orders.lock().unwrap().len(), 1);
    }
}
