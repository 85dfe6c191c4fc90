//! Periodic eviction of expired sessions.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use depot_core::config::session::SessionConfig;

use super::store::SessionStore;

/// The background sweep task.
///
/// Abandoned sessions that never see another `resolve` would otherwise sit
/// in the store forever; the sweep bounds that growth. The task is
/// cancellable through a watch channel so shutdown (and tests) can stop it
/// deterministically instead of letting it run for the life of the process.
#[derive(Debug)]
pub struct SessionSweeper {
    /// The store to sweep.
    store: Arc<SessionStore>,
    /// Time between sweeps.
    interval: Duration,
}

impl SessionSweeper {
    /// Creates a sweeper with an explicit interval.
    pub fn new(store: Arc<SessionStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Creates a sweeper with the configured interval.
    pub fn from_config(store: Arc<SessionStore>, config: &SessionConfig) -> Self {
        Self::new(store, Duration::from_secs(config.sweep_interval_minutes * 60))
    }

    /// Spawns the sweep loop.
    ///
    /// Runs until the shutdown channel changes value or its sender is
    /// dropped. Each pass holds the store's write lock for a single
    /// full-map scan and nothing more.
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately; the first real sweep
            // happens one full interval after startup.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let evicted = self.store.sweep_expired(Utc::now());
                        if evicted > 0 {
                            info!(
                                evicted,
                                remaining = self.store.len(),
                                "Evicted expired sessions"
                            );
                        }
                    }
                    _ = shutdown.changed() => break,
                }
            }

            debug!("Session sweeper stopped");
        })
    }
}
