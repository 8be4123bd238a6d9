use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use super::{PersistenceError, TicketStore};
use crate::model::Comestible;

/// One persisted ticket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketRecord {
    pub cook: String,
    pub display_id: String,
    pub ticket: String,
}

/// Ticket store that keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryTicketStore {
    records: Mutex<Vec<TicketRecord>>,
}

impl MemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TicketRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn save_ticket(&self, cook: &str, item: &dyn Comestible) -> Result<(), PersistenceError> {
        let record = TicketRecord {
            cook: cook.to_string(),
            display_id: item.display_id()?.to_string(),
            ticket: item.ticket()?.to_string(),
        };

        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        records.push(record);
        debug!(cook, size = records.len(), "Ticket saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Burger, Ingredient, ItemError};

    #[tokio::test]
    async fn test_saves_finalized_ticket() {
        let store = MemoryTicketStore::new();
        let burger = Burger::with_recipe(false, "burger_2", vec![Ingredient::Ham]);
        burger.finalize_preparation("Ramon").unwrap();

        store.save_ticket("Ramon", &burger).await.unwrap();

        let records = store.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].cook, "Ramon");
        assert_eq!(records[0].display_id, "burger_2");
        assert!(records[0].ticket.ends_with("Total: 1512.00\nCook: Ramon"));
    }

    #[tokio::test]
    async fn test_rejects_unfinalized_ticket() {
        let store = MemoryTicketStore::new();
        let burger = Burger::with_recipe(false, "burger_2", vec![Ingredient::Ham]);

        let result = store.save_ticket("Ramon", &burger).await;

        assert_eq!(
            result,
            Err(PersistenceError::Contract(ItemError::NotFinalized))
        );
        assert!(store.is_empty());
    }
}
