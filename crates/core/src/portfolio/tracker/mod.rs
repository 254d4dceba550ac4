//! Fetch-and-value driver.
//!
//! [`PortfolioTracker`] owns the most recent snapshot and runs one refresh
//! cycle on demand. [`Poller`] repeats that cycle on a fixed interval until
//! it is stopped.

mod poller;
mod tracker_model;
mod tracker_service;

pub use poller::Poller;
pub use tracker_model::*;
pub use tracker_service::PortfolioTracker;
