//! Converts raw balances and prices into a fiat-denominated snapshot.

mod valuation_calculator;
mod valuation_model;

pub use valuation_calculator::*;
pub use valuation_model::*;
