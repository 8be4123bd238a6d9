//! Generic worker framework.
//!
//! This module provides the building blocks shared by every background worker in the
//! kitchen: a start/stop lifecycle, cooperative cancellation and synchronous event fan-out.
//!
//! # Main Components
//!
//! - [`Lifecycle`] - Owns one spawned run at a time and stops it cooperatively
//! - [`ShutdownToken`] / [`ShutdownSender`] - Watch-channel cancellation scope of one run
//! - [`Event`] - One-to-many synchronous notification channel

pub mod core;
pub mod event;
pub mod shutdown;

// Re-export core types for convenience
pub use self::core::*;
pub use event::{Callback, Event, SubscriptionId};
pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};
