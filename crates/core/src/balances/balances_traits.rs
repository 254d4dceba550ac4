use async_trait::async_trait;

use super::AssetBalance;
use crate::errors::Result;

/// Supplies the account's balances, fiat cash included.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn fetch_balances(&self) -> Result<Vec<AssetBalance>>;
}
