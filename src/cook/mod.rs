//! The cook: the consuming side of the kitchen.
//!
//! A [`Cook`] owns the [`OrderQueue`] and a [`Waiter`] that feeds it. Enabling the cook
//! puts both to work; disabling stops both. Orders are prepared strictly one at a time:
//!
//! 1. Wait for the next queued order (or shutdown).
//! 2. Announce it on [`Cook::on_preparing`].
//! 3. Until the order reports ready, emit the elapsed tick count on [`Cook::on_delay`]
//!    (starting at 0) and sleep one poll interval.
//! 4. Fold the ticks into the latency stats, even when shutdown cut the wait short.
//! 5. If the order is ready: count it, finalize it, save its ticket and announce it on
//!    [`Cook::on_completed`]. Otherwise the order is abandoned and the run ends.
//!
//! A failed ticket save is reported on [`Cook::on_error`] and the run goes on. A broken
//! order contract ([`ItemError`](crate::model::ItemError)) is reported and ends the run.
//! Whenever the run ends by itself (contract violation or a panicking observer), the waiter
//! is stopped with it so no orders pile up without a consumer.

pub mod error;
pub mod queue;
pub mod snapshot;
pub mod stats;

pub use error::*;
pub use queue::*;
pub use snapshot::*;
pub use stats::*;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, error, info, trace, warn};

use crate::config::KitchenConfig;
use crate::framework::core::panic_message;
use crate::framework::{Event, Lifecycle, ShutdownToken};
use crate::model::Comestible;
use crate::store::{PersistenceError, TicketStore};
use crate::waiter::Waiter;

/// How one preparation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Preparation {
    Served,
    Abandoned,
}

struct CookShared<T: Comestible> {
    name: String,
    poll_interval: Duration,
    queue: OrderQueue<T>,
    stats: Mutex<PreparationStats>,
    current: Mutex<Option<Arc<T>>>,
    store: Arc<dyn TicketStore>,
    waiter: Waiter<T>,
    on_preparing: Event<Arc<T>>,
    on_delay: Event<u64>,
    on_completed: Event<Arc<T>>,
    on_error: Event<CookError>,
}

impl<T: Comestible> CookShared<T> {
    fn lock_stats(&self) -> MutexGuard<'_, PreparationStats> {
        self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current(&self) -> Option<Arc<T>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_current(&self, item: Option<Arc<T>>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = item;
    }

    async fn run(self: Arc<Self>, shutdown: ShutdownToken) {
        let requested = shutdown.clone();

        // Observers run on the serving task; a panic there must still stop the waiter.
        match tokio::spawn(self.clone().serve(shutdown)).await {
            Ok(()) => {}
            Err(e) if e.is_panic() => {
                let panic_msg = panic_message(&*e.into_panic());
                error!(cook = %self.name, %panic_msg, "Cook panicked, closing kitchen");
                self.set_current(None);
            }
            Err(e) => error!(cook = %self.name, error = ?e, "Cook task failed"),
        }

        if !requested.is_shutdown() {
            self.waiter.disable().await;
        }
    }

    async fn serve(self: Arc<Self>, mut shutdown: ShutdownToken) {
        let cook = self.name.as_str();
        info!(cook, pending = self.queue.len(), "Kitchen open");

        while let Some(item) = self.queue.next(&mut shutdown).await {
            match self.prepare(item, &mut shutdown).await {
                Ok(Preparation::Served) => {}
                Ok(Preparation::Abandoned) => break,
                Err(e) => {
                    error!(cook, error = %e, "Preparation failed, closing kitchen");
                    self.on_error.emit(&e);
                    break;
                }
            }
        }

        let stats = *self.lock_stats();
        info!(
            cook,
            completed = stats.completed(),
            average_latency = stats.average_latency(),
            pending = self.queue.len(),
            "Kitchen closed"
        );
    }

    async fn prepare(
        &self,
        item: Arc<T>,
        shutdown: &mut ShutdownToken,
    ) -> Result<Preparation, CookError> {
        let cook = self.name.as_str();
        let display_id = item.display_id().unwrap_or("unstarted").to_string();

        self.set_current(Some(item.clone()));
        debug!(cook, %display_id, "Preparing order");
        self.on_preparing.emit(&item);

        let mut ticks: u64 = 0;
        while !shutdown.is_shutdown() && !item.is_ready() {
            trace!(cook, %display_id, ticks, "Waiting for order");
            self.on_delay.emit(&ticks);
            shutdown.sleep(self.poll_interval).await;
            ticks += 1;
        }

        let served = item.is_ready();
        {
            let mut stats = self.lock_stats();
            stats.record_wait(ticks);
            if served {
                stats.record_completion();
            }
        }

        if !served {
            warn!(cook, %display_id, ticks, "Order abandoned");
            self.set_current(None);
            return Ok(Preparation::Abandoned);
        }

        if let Err(e) = item.finalize_preparation(cook) {
            self.set_current(None);
            return Err(e.into());
        }

        match self.store.save_ticket(cook, item.as_ref()).await {
            Ok(()) => {}
            Err(PersistenceError::Contract(e)) => {
                self.set_current(None);
                return Err(e.into());
            }
            Err(source) => {
                let e = CookError::Persistence {
                    display_id: display_id.clone(),
                    source,
                };
                warn!(cook, error = %e, "Ticket not saved");
                self.on_error.emit(&e);
            }
        }

        info!(cook, %display_id, ticks, "Order served");
        self.set_current(None);
        self.on_completed.emit(&item);
        Ok(Preparation::Served)
    }
}

/// Background worker that prepares queued orders and records latency.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(MemoryTicketStore::new());
/// let cook = Cook::<Burger>::new(&KitchenConfig::default(), store)?;
/// cook.on_delay().subscribe(|ticks| println!("waiting {ticks}"));
///
/// cook.enable().await;   // the waiter starts too
/// // ... mark orders ready ...
/// cook.disable().await;  // stops both
/// println!("average: {}", cook.average_latency());
/// ```
pub struct Cook<T: Comestible> {
    shared: Arc<CookShared<T>>,
    lifecycle: Lifecycle,
}

impl<T: Comestible + Default> Cook<T> {
    /// Creates a cook whose waiter produces `T::default()` orders.
    pub fn new(config: &KitchenConfig, store: Arc<dyn TicketStore>) -> Result<Self, CookError> {
        Self::with_factory(config, store, T::default)
    }
}

impl<T: Comestible> Cook<T> {
    /// Creates a cook whose waiter produces orders from `factory`.
    ///
    /// # Errors
    /// [`CookError::Configuration`] for a blank cook name or invalid timing.
    pub fn with_factory(
        config: &KitchenConfig,
        store: Arc<dyn TicketStore>,
        factory: impl Fn() -> T + Send + Sync + 'static,
    ) -> Result<Self, CookError> {
        config.validate()?;

        let name = config.cook_name.trim().to_string();
        let shared = Arc::new(CookShared {
            name: name.clone(),
            poll_interval: config.poll_interval(),
            queue: OrderQueue::new(),
            stats: Mutex::new(PreparationStats::default()),
            current: Mutex::new(None),
            store,
            waiter: Waiter::with_factory(config.cadence(), factory),
            on_preparing: Event::new("preparing"),
            on_delay: Event::new("delay"),
            on_completed: Event::new("completed"),
            on_error: Event::new("error"),
        });

        // The only way orders reach the queue.
        let kitchen = Arc::downgrade(&shared);
        shared.waiter.on_order().subscribe(move |item: &Arc<T>| {
            if let Some(kitchen) = kitchen.upgrade() {
                kitchen.queue.enqueue(item.clone());
            }
        });

        Ok(Self {
            shared,
            lifecycle: Lifecycle::new(format!("cook {}", name)),
        })
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn queue(&self) -> &OrderQueue<T> {
        &self.shared.queue
    }

    pub fn waiter(&self) -> &Waiter<T> {
        &self.shared.waiter
    }

    /// Notified with each order as its preparation begins.
    pub fn on_preparing(&self) -> &Event<Arc<T>> {
        &self.shared.on_preparing
    }

    /// Notified with the elapsed tick count while an order is not ready yet.
    pub fn on_delay(&self) -> &Event<u64> {
        &self.shared.on_delay
    }

    /// Notified with each served order after its ticket was handed to the store.
    pub fn on_completed(&self) -> &Event<Arc<T>> {
        &self.shared.on_completed
    }

    /// Notified with persistence failures and fatal order errors.
    pub fn on_error(&self) -> &Event<CookError> {
        &self.shared.on_error
    }

    pub fn is_enabled(&self) -> bool {
        self.lifecycle.is_running()
    }

    /// Opens the kitchen: starts the waiter and the cook.
    ///
    /// Returns `false` if the cook was already working.
    pub async fn enable(&self) -> bool {
        self.shared.waiter.enable().await;
        let shared = self.shared.clone();
        self.lifecycle.start(|shutdown| shared.run(shutdown)).await
    }

    /// Closes the kitchen: stops the waiter, then the cook, and waits for both.
    ///
    /// An order still waiting for readiness is abandoned. Returns `false` if the cook was
    /// not working.
    pub async fn disable(&self) -> bool {
        self.shared.waiter.disable().await;
        self.lifecycle.stop().await
    }

    pub async fn set_enabled(&self, enabled: bool) -> bool {
        if enabled {
            self.enable().await
        } else {
            self.disable().await
        }
    }

    /// Consistent copy of the running statistics.
    pub fn stats(&self) -> PreparationStats {
        *self.shared.lock_stats()
    }

    pub fn completed_orders(&self) -> u64 {
        self.stats().completed()
    }

    pub fn cumulative_latency(&self) -> f64 {
        self.stats().cumulative_latency()
    }

    pub fn average_latency(&self) -> f64 {
        self.stats().average_latency()
    }

    /// The order being prepared right now, if any.
    pub fn current_order(&self) -> Option<Arc<T>> {
        self.shared.current()
    }

    /// Takes a snapshot for export. Safe while the cook is running.
    pub fn snapshot(&self) -> CookSnapshot {
        let stats = self.shared.lock_stats();
        let in_preparation = self
            .shared
            .current()
            .map(|item| OrderSummary::of(item.as_ref()));
        let pending = self
            .shared
            .queue
            .pending()
            .iter()
            .map(|item| OrderSummary::of(item.as_ref()))
            .collect();

        CookSnapshot {
            name: self.shared.name.clone(),
            enabled: self.is_enabled(),
            completed_orders: stats.completed(),
            cumulative_latency: stats.cumulative_latency(),
            average_latency: stats.average_latency(),
            in_preparation,
            pending,
        }
    }
}
