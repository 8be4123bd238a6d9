use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::KitchenConfig;
use crate::cook::{Cook, CookError, CookSnapshot};
use crate::counter::ServiceCounter;
use crate::model::{Burger, Comestible};
use crate::store::MemoryTicketStore;

/// A complete burger kitchen.
///
/// `Kitchen` is responsible for:
/// - **Wiring**: one cook (which owns its waiter), a service counter attached to the cook
///   and an in-memory ticket store
/// - **Observers**: logging subscribers on the waiter and cook channels
/// - **Lifecycle**: opening and closing the workers together
///
/// # Example
///
/// ```ignore
/// let kitchen = Kitchen::new(&KitchenConfig::default())?;
/// kitchen.open().await;
///
/// // Somebody hands burgers over at the counter.
/// kitchen.counter.serve_next();
///
/// let snapshot = kitchen.close().await;
/// println!("{}", serde_json::to_string_pretty(&snapshot)?);
/// ```
pub struct Kitchen {
    pub cook: Cook<Burger>,
    pub counter: Arc<ServiceCounter<Burger>>,
    pub tickets: Arc<MemoryTicketStore>,
}

impl Kitchen {
    /// Builds the kitchen. Nothing runs until [`Kitchen::open`].
    pub fn new(config: &KitchenConfig) -> Result<Self, CookError> {
        let tickets = Arc::new(MemoryTicketStore::new());
        let cook = Cook::new(config, tickets.clone())?;
        let counter = ServiceCounter::attach(&cook);

        cook.waiter().on_order().subscribe(|item: &Arc<Burger>| {
            debug!(
                display_id = item.display_id().unwrap_or("?"),
                double = item.is_double(),
                cost = item.cost(),
                "New order"
            );
        });
        cook.on_completed().subscribe(|item: &Arc<Burger>| {
            if let Ok(ticket) = item.ticket() {
                debug!(display_id = item.display_id().unwrap_or("?"), %ticket, "Ticket printed");
            }
        });
        cook.on_error().subscribe(|e: &CookError| {
            warn!(error = %e, "Kitchen incident");
        });

        Ok(Self {
            cook,
            counter,
            tickets,
        })
    }

    /// Starts the cook and its waiter. Returns `false` if already open.
    pub async fn open(&self) -> bool {
        let opened = self.cook.enable().await;
        if opened {
            info!(cook = %self.cook.name(), "Kitchen opened");
        }
        opened
    }

    /// Stops both workers and returns the final state of the cook.
    pub async fn close(&self) -> CookSnapshot {
        if self.cook.disable().await {
            info!(cook = %self.cook.name(), tickets = self.tickets.len(), "Kitchen shut");
        }
        self.cook.snapshot()
    }

    pub fn is_open(&self) -> bool {
        self.cook.is_enabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_open_serve_close() {
        let kitchen = Kitchen::new(&KitchenConfig::default()).unwrap();

        assert!(kitchen.open().await);
        assert!(kitchen.is_open());
        assert!(kitchen.cook.waiter().is_enabled());

        // First order is taken at t=0 and goes straight to the counter.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let served = kitchen.counter.serve_next().unwrap();
        tokio::time::sleep(Duration::from_millis(1400)).await;

        let snapshot = kitchen.close().await;
        assert!(!kitchen.is_open());
        assert!(!kitchen.cook.waiter().is_enabled());
        assert_eq!(snapshot.completed_orders, 1);
        assert_eq!(snapshot.cumulative_latency, 1.0);
        assert!(!snapshot.enabled);

        let records = kitchen.tickets.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].display_id, served.display_id().unwrap());
        assert_eq!(records[0].cook, "Ramon");
    }

    #[tokio::test]
    async fn test_close_without_open() {
        let kitchen = Kitchen::new(&KitchenConfig::default()).unwrap();
        let snapshot = kitchen.close().await;
        assert_eq!(snapshot.completed_orders, 0);
        assert!(snapshot.pending.is_empty());
    }
}
