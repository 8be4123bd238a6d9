//! Error types for the cook.

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::ItemError;
use crate::store::PersistenceError;

/// Errors a cook can raise or report.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CookError {
    /// The cook could not be built from the given name or configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The ticket of a completed order could not be saved. The order still counts.
    #[error("Failed to persist ticket for {display_id}: {source}")]
    Persistence {
        display_id: String,
        #[source]
        source: PersistenceError,
    },

    /// An order broke its preparation contract. Fatal for the current run.
    #[error("Order contract violated: {0}")]
    Item(#[from] ItemError),
}

impl From<ConfigError> for CookError {
    fn from(e: ConfigError) -> Self {
        CookError::Configuration(e.to_string())
    }
}
