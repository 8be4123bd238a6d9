//! Error types for order items.

use thiserror::Error;

/// Contract violations on an order item.
///
/// These are programming errors, not transient failures: callers should treat them as fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ItemError {
    /// The item was used before `begin_preparation` ran.
    #[error("Order preparation was never started")]
    NotStarted,

    /// The ticket was read before `finalize_preparation` ran.
    #[error("Order ticket read before preparation was finalized")]
    NotFinalized,
}
