//! # Kitchen Demo
//!
//! Opens a burger kitchen, hands orders over at the counter at a random pace for a few
//! rounds, closes the kitchen and prints the final snapshot as JSON.
//!
//! Configuration is read from the TOML file named by `KITCHEN_CONFIG` (optional) and
//! `KITCHEN_*` environment variables.

use kitchen_pipeline::config::load_config_or_default;
use kitchen_pipeline::lifecycle::{setup_tracing, Kitchen};
use kitchen_pipeline::model::Comestible;
use rand::Rng;
use std::path::PathBuf;
use tracing::{info, Instrument};

const ROUNDS: u32 = 6;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config_path = std::env::var_os("KITCHEN_CONFIG").map(PathBuf::from);
    let config = load_config_or_default(config_path.as_deref()).map_err(|e| e.to_string())?;
    info!(?config, "Starting kitchen");

    let kitchen = Kitchen::new(&config).map_err(|e| e.to_string())?;
    kitchen.open().await;

    let span = tracing::info_span!("service");
    async {
        for round in 1..=ROUNDS {
            let pause = rand::thread_rng().gen_range(1..=config.cadence_ticks.saturating_mul(2));
            tokio::time::sleep(config.time_unit().saturating_mul(pause)).await;

            match kitchen.counter.serve_next() {
                Some(item) => info!(
                    round,
                    display_id = item.display_id().unwrap_or("?"),
                    "Handed over"
                ),
                None => info!(round, "Nothing to hand over"),
            }
        }
    }
    .instrument(span)
    .await;

    let snapshot = kitchen.close().await;
    let report = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
    info!(tickets = kitchen.tickets.len(), "Kitchen closed");
    println!("{report}");
    Ok(())
}
