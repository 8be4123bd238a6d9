use serde::Serialize;

/// Running preparation statistics of one cook.
///
/// Latency is measured in poll ticks. Owned by the cook behind a single lock, so the
/// completed count and the cumulative latency are always read together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PreparationStats {
    completed: u64,
    cumulative_latency: f64,
}

impl PreparationStats {
    pub fn completed(&self) -> u64 {
        self.completed
    }

    pub fn cumulative_latency(&self) -> f64 {
        self.cumulative_latency
    }

    /// Mean ticks per completed order, `0.0` before the first completion.
    pub fn average_latency(&self) -> f64 {
        if self.completed == 0 {
            0.0
        } else {
            self.cumulative_latency / self.completed as f64
        }
    }

    /// Folds the ticks spent waiting on one order, whether or not it completed.
    pub(crate) fn record_wait(&mut self, ticks: u64) {
        self.cumulative_latency += ticks as f64;
    }

    pub(crate) fn record_completion(&mut self) {
        self.completed += 1;
    }
}
