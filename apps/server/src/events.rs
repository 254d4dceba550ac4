use coinfolio_core::events::{PortfolioEvent, PortfolioEventSink};
use serde_json::Value;
use tokio::sync::broadcast;

/// Event names the dashboard listens for on the SSE stream.
pub const PORTFOLIO_UPDATE_START: &str = "portfolio:update-start";
pub const PORTFOLIO_UPDATE_COMPLETE: &str = "portfolio:update-complete";
pub const PORTFOLIO_UPDATE_ERROR: &str = "portfolio:update-error";

/// Serializable envelope that carries event names and optional payloads.
#[derive(Clone, Debug)]
pub struct ServerEvent {
    pub name: &'static str,
    pub payload: Option<Value>,
}

impl ServerEvent {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            payload: None,
        }
    }

    pub fn with_payload(name: &'static str, payload: Value) -> Self {
        Self {
            name,
            payload: Some(payload),
        }
    }
}

impl From<PortfolioEvent> for ServerEvent {
    fn from(event: PortfolioEvent) -> Self {
        let name = match &event {
            PortfolioEvent::RefreshStarted => return ServerEvent::new(PORTFOLIO_UPDATE_START),
            PortfolioEvent::RefreshCompleted { .. } => PORTFOLIO_UPDATE_COMPLETE,
            PortfolioEvent::RefreshFailed { .. } => PORTFOLIO_UPDATE_ERROR,
        };
        match serde_json::to_value(&event) {
            Ok(payload) => ServerEvent::with_payload(name, payload),
            Err(_) => ServerEvent::new(name),
        }
    }
}

/// Broadcast bus that fans out events to any connected clients.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ServerEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _receiver) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ServerEvent> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: ServerEvent) {
        // No subscribers is not an error
        let _ = self.sender.send(event);
    }
}

impl PortfolioEventSink for EventBus {
    fn emit(&self, event: PortfolioEvent) {
        self.publish(event.into());
    }
}
