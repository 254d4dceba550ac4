//! Exponential backoff for transient exchange failures.

use std::future::Future;
use std::time::Duration;

use log::info;

use crate::errors::{BitvavoError, RetryClass};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);

/// How often and how patiently a request is repeated.
///
/// Attempt `n` (zero-based) waits `initial_delay * 2^n` before the next try,
/// so the defaults sleep 1s, 2s and 4s before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    /// A policy that sends every request exactly once.
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Runs `operation` until it succeeds, fails permanently, or the retry
    /// budget is spent. The last error is returned.
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, BitvavoError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, BitvavoError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e)
                    if attempt < self.max_retries
                        && e.retry_class() == RetryClass::WithBackoff =>
                {
                    let delay = self.delay_for(attempt);
                    attempt += 1;
                    info!(
                        "[{}] Retry attempt {}/{} after {} ms: {}",
                        label,
                        attempt,
                        self.max_retries,
                        delay.as_millis(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
