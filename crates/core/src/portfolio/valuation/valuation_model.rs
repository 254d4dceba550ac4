//! Portfolio valuation domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::utils::saturating_sum;

/// Unit price in the fiat currency, keyed by base asset symbol.
pub type PriceLookup = HashMap<String, Decimal>;

/// Fiat valuation of one non-fiat asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetValuation {
    pub symbol: String,
    pub available: Decimal,
    pub in_order: Decimal,
    pub fiat_value: Decimal,
}

impl AssetValuation {
    /// Total quantity held, free and reserved.
    pub fn quantity(&self) -> Decimal {
        self.available.saturating_add(self.in_order)
    }
}

/// One complete valuation of the account for a single fetch cycle.
///
/// Produced by [`value_portfolio`](super::value_portfolio) and never mutated
/// afterwards; each cycle yields a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub fiat_currency: String,
    pub fiat_available: Decimal,
    pub fiat_in_orders: Decimal,
    pub asset_valuations: Vec<AssetValuation>,
    pub total_value: Decimal,
    pub asset_count: usize,
}

impl PortfolioSnapshot {
    pub fn empty(fiat_currency: impl Into<String>) -> Self {
        Self {
            fiat_currency: fiat_currency.into(),
            fiat_available: Decimal::ZERO,
            fiat_in_orders: Decimal::ZERO,
            asset_valuations: Vec::new(),
            total_value: Decimal::ZERO,
            asset_count: 0,
        }
    }

    /// Fiat value of the non-fiat assets only. Saturates like `total_value`.
    pub fn assets_value(&self) -> Decimal {
        saturating_sum(self.asset_valuations.iter().map(|v| v.fiat_value))
    }

    /// Fiat cash, free and reserved.
    pub fn fiat_balance(&self) -> Decimal {
        self.fiat_available.saturating_add(self.fiat_in_orders)
    }

    pub fn valuation_for(&self, symbol: &str) -> Option<&AssetValuation> {
        self.asset_valuations.iter().find(|v| v.symbol == symbol)
    }
}
