use async_trait::async_trait;

use super::PriceQuote;
use crate::errors::Result;

/// Supplies the latest price of every traded market.
#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_prices(&self) -> Result<Vec<PriceQuote>>;
}
