//! Account balances as reported by the exchange.

mod balances_model;
mod balances_traits;

pub use balances_model::AssetBalance;
pub use balances_traits::BalanceSource;
