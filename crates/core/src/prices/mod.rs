//! Spot prices per market.

mod prices_model;
mod prices_traits;

pub use prices_model::PriceQuote;
pub use prices_traits::PriceSource;
