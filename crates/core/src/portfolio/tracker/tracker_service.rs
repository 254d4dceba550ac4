use chrono::Utc;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::balances::BalanceSource;
use crate::errors::Result;
use crate::events::{NoOpPortfolioEventSink, PortfolioEvent, PortfolioEventSink};
use crate::portfolio::valuation::{value_portfolio_with_prices, PortfolioSnapshot};
use crate::prices::PriceSource;

use super::{PortfolioState, PortfolioView};

/// Owns the latest portfolio snapshot and runs the fetch-and-value cycle.
///
/// The tracker is the only place the snapshot lives. Handlers and the
/// poller share it through an `Arc<PortfolioTracker>`.
pub struct PortfolioTracker {
    balance_source: Arc<dyn BalanceSource>,
    price_source: Arc<dyn PriceSource>,
    fiat_currency: String,
    event_sink: Arc<dyn PortfolioEventSink>,
    state: RwLock<PortfolioState>,
}

impl PortfolioTracker {
    pub fn new(
        balance_source: Arc<dyn BalanceSource>,
        price_source: Arc<dyn PriceSource>,
        fiat_currency: impl Into<String>,
    ) -> Self {
        Self {
            balance_source,
            price_source,
            fiat_currency: fiat_currency.into(),
            event_sink: Arc::new(NoOpPortfolioEventSink),
            state: RwLock::new(PortfolioState::default()),
        }
    }

    pub fn with_event_sink(mut self, event_sink: Arc<dyn PortfolioEventSink>) -> Self {
        self.event_sink = event_sink;
        self
    }

    pub fn fiat_currency(&self) -> &str {
        &self.fiat_currency
    }

    pub fn balance_source(&self) -> &Arc<dyn BalanceSource> {
        &self.balance_source
    }

    pub fn price_source(&self) -> &Arc<dyn PriceSource> {
        &self.price_source
    }

    /// Runs one fetch-and-value cycle.
    ///
    /// Balances and prices are fetched concurrently and both must succeed.
    /// On failure the previous snapshot stays in place and the error is
    /// returned; nothing partial is ever stored.
    pub async fn refresh(&self) -> Result<Arc<PortfolioSnapshot>> {
        debug!("Refreshing portfolio in {}", self.fiat_currency);
        self.event_sink.emit(PortfolioEvent::RefreshStarted);

        let fetched = tokio::try_join!(
            self.balance_source.fetch_balances(),
            self.price_source.fetch_prices()
        );
        let now = Utc::now();

        match fetched {
            Ok((balances, quotes)) => {
                let (snapshot, prices) =
                    value_portfolio_with_prices(&balances, &quotes, &self.fiat_currency);
                let snapshot = Arc::new(snapshot);
                {
                    let mut state = self.state.write().await;
                    *state = PortfolioState::succeeded(snapshot.clone(), prices, now);
                }
                info!(
                    "Portfolio refreshed: {} {} across {} assets",
                    snapshot.total_value, self.fiat_currency, snapshot.asset_count
                );
                self.event_sink.emit(PortfolioEvent::RefreshCompleted {
                    total_value: snapshot.total_value,
                    asset_count: snapshot.asset_count,
                });
                Ok(snapshot)
            }
            Err(err) => {
                warn!("Portfolio refresh failed: {}", err);
                self.state
                    .write()
                    .await
                    .record_failure(err.to_string(), now);
                self.event_sink.emit(PortfolioEvent::RefreshFailed {
                    message: err.to_string(),
                    retryable: err.is_retryable(),
                });
                Err(err)
            }
        }
    }

    pub async fn state(&self) -> PortfolioState {
        self.state.read().await.clone()
    }

    pub async fn view(&self) -> PortfolioView {
        self.state.read().await.view()
    }

    pub async fn latest_snapshot(&self) -> Option<Arc<PortfolioSnapshot>> {
        self.state.read().await.snapshot.clone()
    }
}
