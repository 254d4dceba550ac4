//! Cancellable repeating refresh task.

use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::PortfolioTracker;

/// Shortest interval the poller accepts.
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Runs [`PortfolioTracker::refresh`] immediately and then on every tick.
///
/// Call [`stop`](Poller::stop) on teardown. `stop` consumes the handle, so it
/// runs at most once; a poller dropped without `stop` aborts its task.
pub struct Poller {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    period: Duration,
}

impl Poller {
    /// Spawns the polling task on the current tokio runtime.
    pub fn start(tracker: Arc<PortfolioTracker>, period: Duration) -> Self {
        let period = if period < MIN_INTERVAL {
            warn!(
                "Refresh interval {:?} is below the minimum, using {:?}",
                period, MIN_INTERVAL
            );
            MIN_INTERVAL
        } else {
            period
        };

        let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            info!("Portfolio poller started ({}s interval)", period.as_secs());

            // First tick is immediate, later ticks are `period` apart
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            _ = &mut shutdown_rx => break,
                            result = tracker.refresh() => {
                                if let Err(e) = result {
                                    debug!("Scheduled refresh failed, retrying next tick: {}", e);
                                }
                            }
                        }
                    }
                }
            }

            info!("Portfolio poller stopped");
        });

        Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
            period,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Signals the task to stop and waits for it to finish.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    warn!("Portfolio poller ended abnormally: {}", e);
                }
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
