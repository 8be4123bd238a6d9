use serde::Serialize;

use crate::model::Comestible;

/// Serializable view of one order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub display_id: Option<String>,
    pub description: String,
    pub ready: bool,
}

impl OrderSummary {
    pub fn of<T: Comestible + ?Sized>(item: &T) -> Self {
        Self {
            display_id: item.display_id().ok().map(str::to_string),
            description: item.to_string(),
            ready: item.is_ready(),
        }
    }
}

/// Point-in-time view of a cook for external export.
///
/// The completed count and cumulative latency come from one read of the stats lock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CookSnapshot {
    pub name: String,
    pub enabled: bool,
    pub completed_orders: u64,
    pub cumulative_latency: f64,
    pub average_latency: f64,
    pub in_preparation: Option<OrderSummary>,
    pub pending: Vec<OrderSummary>,
}
