//! Owns the background portfolio poller for the server.

use std::sync::Arc;
use std::time::Duration;

use coinfolio_core::{Poller, PortfolioTracker};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// What a login did to the refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTrigger {
    /// The poller was not running and has been started; its first tick
    /// refreshes immediately.
    PollerStarted,
    /// The poller was already running; one extra refresh was spawned.
    RefreshQueued,
}

pub struct RefreshScheduler {
    tracker: Arc<PortfolioTracker>,
    period: Duration,
    poller: Mutex<Option<Poller>>,
}

impl RefreshScheduler {
    pub fn new(tracker: Arc<PortfolioTracker>, period: Duration) -> Self {
        Self {
            tracker,
            period,
            poller: Mutex::new(None),
        }
    }

    pub async fn on_authenticated(&self) -> RefreshTrigger {
        let mut slot = self.poller.lock().await;
        if slot.as_ref().is_some_and(Poller::is_running) {
            drop(slot);
            let tracker = self.tracker.clone();
            tokio::spawn(async move {
                if let Err(e) = tracker.refresh().await {
                    debug!("Post-login refresh failed: {}", e);
                }
            });
            return RefreshTrigger::RefreshQueued;
        }

        info!(
            "Starting portfolio poller ({}s interval)",
            self.period.as_secs()
        );
        *slot = Some(Poller::start(self.tracker.clone(), self.period));
        RefreshTrigger::PollerStarted
    }

    pub async fn is_running(&self) -> bool {
        self.poller
            .lock()
            .await
            .as_ref()
            .is_some_and(Poller::is_running)
    }

    /// Stops the poller. Returns `false` when there was none to stop.
    pub async fn shutdown(&self) -> bool {
        let poller = self.poller.lock().await.take();
        match poller {
            Some(poller) => {
                poller.stop().await;
                info!("Portfolio poller shut down");
                true
            }
            None => {
                debug!("No portfolio poller to shut down");
                false
            }
        }
    }
}
