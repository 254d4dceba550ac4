//! Portfolio valuation and the fetch-and-value driver.

pub mod tracker;
pub mod valuation;

pub use tracker::*;
pub use valuation::*;
