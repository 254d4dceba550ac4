//! Portfolio event sink trait and implementations.

use std::sync::{Arc, Mutex};

use super::PortfolioEvent;

/// Trait for receiving portfolio events.
///
/// `emit()` is called inline by the tracker and must not block.
/// Failure to deliver must not affect the refresh cycle.
pub trait PortfolioEventSink: Send + Sync {
    fn emit(&self, event: PortfolioEvent);
}

/// No-op implementation for tests or contexts that don't need events.
#[derive(Clone, Default)]
pub struct NoOpPortfolioEventSink;

impl PortfolioEventSink for NoOpPortfolioEventSink {
    fn emit(&self, _event: PortfolioEvent) {}
}

/// Mock sink for testing - collects emitted events.
#[derive(Clone, Default)]
pub struct MockPortfolioEventSink {
    events: Arc<Mutex<Vec<PortfolioEvent>>>,
}

impl MockPortfolioEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected events.
    pub fn events(&self) -> Vec<PortfolioEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Returns the number of collected events.
    pub fn len(&self) -> usize {
        self.events.lock().map(|e| e.len()).unwrap_or_default()
    }

    /// Returns true if no events have been collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PortfolioEventSink for MockPortfolioEventSink {
    fn emit(&self, event: PortfolioEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
