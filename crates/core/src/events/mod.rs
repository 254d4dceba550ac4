//! Portfolio events module.
//!
//! Provides the events the refresh driver emits around each fetch cycle and
//! the sink trait for receiving them. The server implements the sink to fan
//! events out to connected dashboards.

mod portfolio_event;
mod sink;

pub use portfolio_event::*;
pub use sink::*;
