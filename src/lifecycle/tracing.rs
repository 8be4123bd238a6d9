//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Log lines use the compact format without the crate/module prefix (`with_target(false)`).
//! Levels come from the `RUST_LOG` environment variable.
//!
//! ## What Gets Traced
//!
//! - **Worker Lifecycle**: `Started` / `Stopped` per worker, kitchen open and closed
//! - **Orders**: taken by the waiter, prepared, served or abandoned
//! - **Delays**: every poll tick while an order is not ready (`trace`)
//! - **Errors**: failed ticket saves (`warn`) and broken order contracts (`error`)
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle and served orders
//! RUST_LOG=info cargo run
//!
//! # Per-order steps
//! RUST_LOG=debug cargo run
//!
//! # Every delay tick
//! RUST_LOG=kitchen_pipeline::cook=trace cargo run
//! ```
//!
//! With `RUST_LOG=info` a short session reads:
//!
//! ```text
//! INFO Started worker="cook Ramon"
//! INFO Kitchen open cook="Ramon" pending=0
//! INFO Started worker="waiter"
//! INFO Waiter taking orders cadence_ms=5000
//! INFO Order served cook="Ramon" display_id="burger_3" ticks=2
//! INFO Waiter off duty orders_taken=2
//! INFO Stopped worker="waiter"
//! WARN Order abandoned cook="Ramon" display_id="burger_6" ticks=1
//! INFO Kitchen closed cook="Ramon" completed=1 average_latency=2.0 pending=0
//! INFO Stopped worker="cook Ramon"
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
