//! Coinfolio Core - Domain entities, valuation and the refresh driver.
//!
//! This crate contains the business logic of the dashboard. It knows nothing
//! about HTTP or a specific exchange: balances and prices arrive through the
//! [`BalanceSource`] and [`PriceSource`] traits, which the exchange crate
//! implements.

pub mod balances;
pub mod constants;
pub mod errors;
pub mod events;
pub mod portfolio;
pub mod prices;
pub mod utils;

// Re-export common types from the balance, price and portfolio modules
pub use balances::{AssetBalance, BalanceSource};
pub use portfolio::*;
pub use prices::{PriceQuote, PriceSource};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
