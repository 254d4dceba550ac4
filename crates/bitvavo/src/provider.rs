use async_trait::async_trait;

use coinfolio_core::errors::{Result, SourceKind};
use coinfolio_core::{AssetBalance, BalanceSource, Error, PriceQuote, PriceSource};

use crate::client::BitvavoClient;

#[async_trait]
impl BalanceSource for BitvavoClient {
    async fn fetch_balances(&self) -> Result<Vec<AssetBalance>> {
        self.balance()
            .await
            .map_err(|e| Error::from(e.into_source_error(SourceKind::Balances)))
    }
}

#[async_trait]
impl PriceSource for BitvavoClient {
    async fn fetch_prices(&self) -> Result<Vec<PriceQuote>> {
        self.ticker_prices()
            .await
            .map_err(|e| Error::from(e.into_source_error(SourceKind::Prices)))
    }
}
