//! Portfolio event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Facts about a fetch-and-value cycle, emitted by the tracker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PortfolioEvent {
    /// A cycle began fetching balances and prices.
    RefreshStarted,

    /// A cycle finished and its snapshot replaced the previous one.
    RefreshCompleted {
        total_value: Decimal,
        asset_count: usize,
    },

    /// A cycle failed; the previous snapshot, if any, is still displayed.
    RefreshFailed { message: String, retryable: bool },
}
