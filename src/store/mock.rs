//! # Mock Ticket Store
//!
//! Scripted [`TicketStore`] for testing cooks without a database.
//!
//! Queue up the outcome of each expected `save_ticket` call with the fluent builder, run the
//! code under test, then call [`MockTicketStore::verify`] to assert every expectation was used.
//!
//! ```ignore
//! let store = Arc::new(MockTicketStore::new());
//! store.expect_save().return_err(PersistenceError::Unavailable("db down".into()));
//! store.expect_save().return_ok();
//!
//! // ... run a cook against `store` ...
//! store.verify();
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use super::{PersistenceError, TicketRecord, TicketStore};
use crate::model::Comestible;

/// A ticket store with expectation tracking for fluent testing.
#[derive(Debug, Default)]
pub struct MockTicketStore {
    expectations: Arc<Mutex<VecDeque<Result<(), PersistenceError>>>>,
    calls: Mutex<Vec<TicketRecord>>,
}

impl MockTicketStore {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects one more `save_ticket` call.
    pub fn expect_save(&self) -> SaveExpectationBuilder {
        SaveExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Every call received so far, successful or not.
    pub fn calls(&self) -> Vec<TicketRecord> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

#[async_trait]
impl TicketStore for MockTicketStore {
    async fn save_ticket(&self, cook: &str, item: &dyn Comestible) -> Result<(), PersistenceError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(TicketRecord {
                cook: cook.to_string(),
                display_id: item.display_id().unwrap_or_default().to_string(),
                ticket: item.ticket().unwrap_or_default().to_string(),
            });

        let expectation = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match expectation {
            Some(response) => response,
            None => panic!("Unexpected save_ticket call for cook {}", cook),
        }
    }
}

/// Builder for `save_ticket` expectations.
pub struct SaveExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Result<(), PersistenceError>>>>,
}

impl SaveExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self) {
        self.push(Ok(()));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: PersistenceError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<(), PersistenceError>) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }
}
