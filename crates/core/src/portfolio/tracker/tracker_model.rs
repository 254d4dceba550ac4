//! State held by the refresh driver between cycles.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::portfolio::valuation::{PortfolioSnapshot, PriceLookup};

/// Where the displayed data stands relative to the last refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioStatus {
    /// No cycle has completed yet.
    Pending,
    /// The last cycle succeeded.
    Fresh,
    /// The last cycle failed; the previous snapshot is still shown.
    Stale,
    /// The last cycle failed and there is nothing to show yet.
    Failed,
}

/// Latest result of the refresh cycle.
///
/// The snapshot and price table are shared behind `Arc` and swapped as a
/// whole on every successful cycle; readers never see a partial update.
#[derive(Debug, Clone)]
pub struct PortfolioState {
    pub status: PortfolioStatus,
    pub snapshot: Option<Arc<PortfolioSnapshot>>,
    pub prices: Arc<PriceLookup>,
    pub last_error: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl Default for PortfolioState {
    fn default() -> Self {
        Self {
            status: PortfolioStatus::Pending,
            snapshot: None,
            prices: Arc::new(PriceLookup::new()),
            last_error: None,
            last_updated_at: None,
            last_attempt_at: None,
        }
    }
}

impl PortfolioState {
    pub(crate) fn succeeded(
        snapshot: Arc<PortfolioSnapshot>,
        prices: PriceLookup,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            status: PortfolioStatus::Fresh,
            snapshot: Some(snapshot),
            prices: Arc::new(prices),
            last_error: None,
            last_updated_at: Some(at),
            last_attempt_at: Some(at),
        }
    }

    /// Records a failed cycle, keeping whatever was displayed before.
    pub(crate) fn record_failure(&mut self, message: String, at: DateTime<Utc>) {
        self.status = if self.snapshot.is_some() {
            PortfolioStatus::Stale
        } else {
            PortfolioStatus::Failed
        };
        self.last_error = Some(message);
        self.last_attempt_at = Some(at);
    }

    /// Serializable view for presentation.
    pub fn view(&self) -> PortfolioView {
        PortfolioView {
            status: self.status,
            snapshot: self.snapshot.as_deref().cloned(),
            prices: self
                .prices
                .iter()
                .map(|(symbol, price)| (symbol.clone(), *price))
                .collect(),
            last_error: self.last_error.clone(),
            last_updated_at: self.last_updated_at,
            last_attempt_at: self.last_attempt_at,
        }
    }
}

/// What a dashboard renders: the snapshot, the raw price table and the
/// refresh status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioView {
    pub status: PortfolioStatus,
    pub snapshot: Option<PortfolioSnapshot>,
    pub prices: BTreeMap<String, Decimal>,
    pub last_error: Option<String>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub last_attempt_at: Option<DateTime<Utc>>,
}
