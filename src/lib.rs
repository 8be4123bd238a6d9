//! # Kitchen Pipeline
//!
//! > **A producer/consumer order pipeline built on Tokio tasks.**
//!
//! A waiter produces orders at a fixed cadence. A cook consumes them one at a time, waits
//! until each order reports ready, signs its ticket and hands it to a ticket store. Every
//! step is published on synchronous observer channels, and the cook keeps latency
//! statistics measured in poll ticks.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Generic Workers
//! You'll see `Cook<T: Comestible>` and `Waiter<T: Comestible>` everywhere. The workers never
//! look inside an order; anything that implements [`Comestible`](model::Comestible) can go
//! through the kitchen. [`Burger`](model::Burger) is the one shipped with the crate.
//!
//! ### Cooperative Cancellation
//! Each worker runs in its own Tokio task under a [`Lifecycle`](framework::Lifecycle).
//! Disabling a worker signals its [`ShutdownToken`](framework::ShutdownToken) and waits for
//! the task to end. Every sleep in a worker is interruptible, so stopping takes at most one
//! in-flight step.
//!
//! ### Observer Channels
//! [`Event`](framework::Event) is a synchronous fan-out: callbacks run on the emitting task,
//! in registration order, and may subscribe or unsubscribe while being notified.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each concern defines its own error type: [`ItemError`](model::ItemError),
//! [`PersistenceError`](store::PersistenceError), [`ConfigError`](config::ConfigError) and
//! [`CookError`](cook::CookError), which wraps the others with `#[from]` conversions.
//! A failed ticket save is reported and the cook keeps working; a broken order contract ends
//! the run.
//!
//! ### 2. Concurrency Model
//! The waiter enqueues, the cook dequeues; the [`OrderQueue`](cook::OrderQueue) is the only
//! state they share. Statistics live behind one lock so the completed count and the
//! cumulative latency are always read together.
//!
//! ### 3. Observability
//! We use `tracing` everywhere with structured fields. See the [`lifecycle::tracing`] module.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Worker lifecycle, shutdown signalling and observer channels.
//! - **Key items**: [`Lifecycle`](framework::Lifecycle), [`Event`](framework::Event).
//!
//! ### 2. The Workers ([`waiter`], [`cook`])
//! - **Role**: The producing and consuming sides of the kitchen.
//! - **Key items**: [`Waiter`](waiter::Waiter), [`Cook`](cook::Cook),
//!   [`CookSnapshot`](cook::CookSnapshot).
//!
//! ### 3. The Orders ([`model`], [`counter`])
//! - **Role**: The item contract, the burger, and the counter that marks orders ready.
//!
//! ### 4. The Edges ([`store`], [`config`], [`lifecycle`])
//! - **Role**: Ticket persistence, configuration loading and the [`Kitchen`](lifecycle::Kitchen)
//!   that wires everything together.
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Run with info logs
//! RUST_LOG=info cargo run
//!
//! # Faster clock from a config file
//! KITCHEN_CONFIG=kitchen.toml RUST_LOG=debug cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod config;
pub mod cook;
pub mod counter;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod store;
pub mod waiter;
