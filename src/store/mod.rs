//! Persistence boundary for finished orders.
//!
//! The cook hands every completed order to a [`TicketStore`]. The real database lives
//! outside this crate; [`MemoryTicketStore`] keeps tickets in memory and
//! [`mock::MockTicketStore`] scripts results for tests.

pub mod error;
pub mod memory;
pub mod mock;

pub use error::*;
pub use memory::*;

use async_trait::async_trait;

use crate::model::Comestible;

/// Writes the ticket of a completed order.
///
/// # Errors
/// Implementations return a [`PersistenceError`] instead of panicking; the cook reports it
/// and keeps working.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn save_ticket(&self, cook: &str, item: &dyn Comestible) -> Result<(), PersistenceError>;
}
