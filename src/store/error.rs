//! Error types for ticket persistence.

use thiserror::Error;

use crate::model::ItemError;

/// Errors a [`TicketStore`](super::TicketStore) can report.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PersistenceError {
    /// The backing store could not be reached.
    #[error("Ticket store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the ticket.
    #[error("Ticket rejected: {0}")]
    Rejected(String),

    /// The item handed over had no ticket to save. Not a storage failure: the cook treats it
    /// as a broken order contract and stops.
    #[error("Order contract violated: {0}")]
    Contract(#[from] ItemError),
}
