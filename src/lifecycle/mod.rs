//! Wiring and process-level setup.

pub mod kitchen;
pub mod tracing;

pub use self::kitchen::Kitchen;
pub use self::tracing::setup_tracing;
