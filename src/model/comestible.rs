use std::fmt;

use super::ItemError;

/// Contract every order item must satisfy to flow through the kitchen.
///
/// # Architecture Note
/// The [`Waiter`](crate::waiter::Waiter) and [`Cook`](crate::cook::Cook) are generic over
/// this trait, so swapping the burger for another dish never touches worker logic.
///
/// Items are shared as `Arc<T>` between the queue, observers and whoever drives the
/// readiness signal, so every operation takes `&self` and implementations use interior
/// mutability (atomics and once-cells).
///
/// # Lifecycle
/// 1. [`begin_preparation`](Comestible::begin_preparation) right after construction, before
///    the item is published.
/// 2. [`mark_ready`](Comestible::mark_ready) by an external readiness source.
/// 3. [`finalize_preparation`](Comestible::finalize_preparation) by the cook, which freezes
///    the [`ticket`](Comestible::ticket).
pub trait Comestible: fmt::Display + Send + Sync + 'static {
    /// Assigns the display identifier and derived attributes. Idempotent.
    fn begin_preparation(&self);

    /// Computes and freezes the ticket. Idempotent once the ticket exists.
    ///
    /// # Errors
    /// [`ItemError::NotStarted`] if [`begin_preparation`](Comestible::begin_preparation)
    /// never ran.
    fn finalize_preparation(&self, cook: &str) -> Result<(), ItemError>;

    /// Pure read of the readiness flag.
    fn is_ready(&self) -> bool;

    /// External readiness signal. Flips the flag to `true`; never reverts.
    fn mark_ready(&self);

    /// Tag used to look up presentation assets.
    fn display_id(&self) -> Result<&str, ItemError>;

    /// The printable ticket, available after finalize.
    fn ticket(&self) -> Result<&str, ItemError>;
}
