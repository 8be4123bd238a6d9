//! # Worker Lifecycle
//!
//! This module defines the generic start/stop machinery shared by every background worker.
//!
//! ## Key Types
//!
//! - [`Lifecycle`]: Owns at most one running task and its shutdown sender.
//!
//! ## State Machine
//!
//! ```text
//! Stopped --start()--> Running --stop()--> Stopped
//! ```
//!
//! `start` on a running worker and `stop` on a stopped one are no-ops that return `false`.
//! A run that ended by itself (fatal error or panic) counts as stopped: `is_running` turns
//! `false` as soon as its task unwinds, and the next `start` or `stop` reaps it.
//! `stop` signals the run's [`ShutdownToken`] and waits for the task to finish, so when it
//! returns the worker is really stopped and a later `start` can never overlap the old run.

use std::any::Any;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

/// The run that is currently alive, if any.
struct ActiveRun {
    shutdown: ShutdownSender,
    handle: JoinHandle<()>,
}

/// Clears the alive flag when the run task ends, including by panic.
struct AliveGuard {
    worker: String,
    alive: Arc<AtomicBool>,
}

impl Drop for AliveGuard {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::SeqCst);
        if std::thread::panicking() {
            error!(worker = %self.worker, "Run task panicked");
        }
    }
}

/// Extracts the message of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Start/stop controller for one background worker.
///
/// # Concurrency Model
/// `start` and `stop` are serialized through an async mutex that is held while a run is
/// being joined. Two callers racing to toggle the same worker therefore observe each
/// other's completed transition, never a half-started run.
pub struct Lifecycle {
    name: String,
    active: Mutex<Option<ActiveRun>>,
    alive: Arc<AtomicBool>,
}

impl Lifecycle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: Mutex::new(None),
            alive: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` while a run task exists and has not returned.
    pub fn is_running(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Spawns `run` with a fresh shutdown token unless a run is already alive.
    ///
    /// Returns `true` if a new run was started.
    pub async fn start<F, Fut>(&self, run: F) -> bool
    where
        F: FnOnce(ShutdownToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut active = self.active.lock().await;

        if active.is_some() && self.is_running() {
            debug!(worker = %self.name, "Already running");
            return false;
        }
        // A run that ended on its own (fatal error or panic) is reaped here.
        if let Some(finished) = active.take() {
            Self::join(&self.name, finished).await;
        }

        let (shutdown, token) = shutdown_channel();
        self.alive.store(true, Ordering::SeqCst);
        let guard = AliveGuard {
            worker: self.name.clone(),
            alive: self.alive.clone(),
        };

        let work = run(token);
        let handle = tokio::spawn(async move {
            let _guard = guard;
            work.await;
        });

        *active = Some(ActiveRun { shutdown, handle });
        info!(worker = %self.name, "Started");
        true
    }

    /// Requests cooperative cancellation and waits for the run to end.
    ///
    /// Returns `true` if a live run was stopped. A run that already ended by itself is only
    /// reaped.
    pub async fn stop(&self) -> bool {
        let mut active = self.active.lock().await;

        let Some(run) = active.take() else {
            debug!(worker = %self.name, "Not running");
            return false;
        };
        if !self.is_running() {
            debug!(worker = %self.name, "Run already ended");
            Self::join(&self.name, run).await;
            return false;
        }

        run.shutdown.shutdown();
        Self::join(&self.name, run).await;
        info!(worker = %self.name, "Stopped");
        true
    }

    async fn join(name: &str, run: ActiveRun) {
        match run.handle.await {
            Ok(()) => {}
            Err(e) if e.is_panic() => {
                let panic_msg = panic_message(&*e.into_panic());
                warn!(worker = %name, %panic_msg, "Reaped panicked run");
            }
            Err(e) => error!(worker = %name, error = ?e, "Run task failed"),
        }
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        if let Some(run) = self.active.get_mut().take() {
            run.shutdown.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_start_stop_cycle() {
        let lifecycle = Lifecycle::new("ticker");
        let ticks = Arc::new(AtomicU32::new(0));

        let counter = ticks.clone();
        let started = lifecycle
            .start(|mut shutdown| async move {
                while shutdown.sleep(Duration::from_secs(1)).await {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await;
        assert!(started);
        assert!(lifecycle.is_running());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert!(lifecycle.stop().await);
        assert!(!lifecycle.is_running());
        assert_eq!(ticks.load(Ordering::SeqCst), 3);

        // Nothing left to stop.
        assert!(!lifecycle.stop().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_noop() {
        let lifecycle = Lifecycle::new("single");
        let runs = Arc::new(AtomicU32::new(0));

        for _ in 0..3 {
            let runs = runs.clone();
            lifecycle
                .start(|mut shutdown| async move {
                    runs.fetch_add(1, Ordering::SeqCst);
                    shutdown.wait().await;
                })
                .await;
        }
        tokio::task::yield_now().await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
        lifecycle.stop().await;
    }

    #[tokio::test]
    async fn test_restart_after_run_ended_on_its_own() {
        let lifecycle = Lifecycle::new("short-lived");

        lifecycle.start(|_| async {}).await;
        while lifecycle.is_running() {
            tokio::task::yield_now().await;
        }

        assert!(lifecycle.start(|mut s| async move { s.wait().await }).await);
        assert!(lifecycle.is_running());
        assert!(lifecycle.stop().await);
    }

    #[tokio::test]
    async fn test_stop_after_run_ended_on_its_own_is_noop() {
        let lifecycle = Lifecycle::new("short-lived");

        lifecycle.start(|_| async {}).await;
        while lifecycle.is_running() {
            tokio::task::yield_now().await;
        }

        assert!(!lifecycle.stop().await);
        assert!(!lifecycle.stop().await);
    }

    #[tokio::test]
    async fn test_panicked_run_is_not_running() {
        let lifecycle = Lifecycle::new("fragile");

        lifecycle
            .start(|_| async {
                panic!("observer boom");
            })
            .await;
        for _ in 0..100 {
            if !lifecycle.is_running() {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert!(!lifecycle.is_running());

        // The dead run is reaped and a fresh one can start.
        assert!(lifecycle.start(|mut s| async move { s.wait().await }).await);
        assert!(lifecycle.is_running());
        assert!(lifecycle.stop().await);
    }

    #[test]
    fn test_panic_message_of_common_payloads() {
        assert_eq!(panic_message(&"boom"), "boom");
        assert_eq!(panic_message(&"boom".to_string()), "boom");
        assert_eq!(panic_message(&42u8), "Unknown panic");
    }
}
