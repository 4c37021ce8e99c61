//! Background expiry sweep.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::SessionStore;

/// Owns the sweeper task. Dropping the handle stops the sweeper.
///
/// This is a drop guard: the server keeps it alive for as long as it
/// serves requests, and cleanup happens even if serving ends with an
/// error.
#[derive(Debug)]
pub struct SweeperHandle {
    task: JoinHandle<()>,
}

impl SweeperHandle {
    pub(crate) fn spawn(store: Arc<SessionStore>) -> Self {
        let period = store.config().sweep_interval;
        let task = tokio::spawn(async move {
            let mut interval = time::interval(period);
            // Missed sweeps are not replayed.
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            tracing::debug!(?period, "session sweeper started");
            loop {
                // The first tick completes immediately: that's the startup sweep.
                interval.tick().await;
                store.purge_expired(Instant::now()).await;
            }
        });
        Self { task }
    }

    /// Stops the sweeper.
    pub fn abort(&self) {
        self.task.abort();
    }
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
