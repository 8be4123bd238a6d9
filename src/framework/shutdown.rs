//! Cooperative cancellation for worker runs.
//!
//! Every run gets a fresh [`shutdown_channel`]. The owner keeps the [`ShutdownSender`],
//! the run loop keeps the [`ShutdownToken`] and checks it at its suspension points.

use std::time::Duration;
use tokio::sync::watch;

/// Shutdown signal observed by a running worker.
#[derive(Clone, Debug)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

impl ShutdownToken {
    /// Check if shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the shutdown signal.
    ///
    /// Returns immediately if shutdown was already requested or the sender is gone.
    pub async fn wait(&mut self) {
        let _ = self.rx.wait_for(|requested| *requested).await;
    }

    /// Sleep for `duration` unless shutdown is requested first.
    ///
    /// Returns `true` when the full duration elapsed and no shutdown is pending.
    pub async fn sleep(&mut self, duration: Duration) -> bool {
        let elapsed = tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            _ = self.wait() => false,
        };
        elapsed && !self.is_shutdown()
    }
}

/// Owner side of a [`ShutdownToken`].
#[derive(Debug)]
pub struct ShutdownSender {
    tx: watch::Sender<bool>,
}

impl ShutdownSender {
    /// Signal shutdown to the run holding the token
    pub fn shutdown(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_shutdown(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Create a shutdown channel
pub fn shutdown_channel() -> (ShutdownSender, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSender { tx }, ShutdownToken { rx })
}
