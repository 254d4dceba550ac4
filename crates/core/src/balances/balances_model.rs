use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::parse_decimal_or_zero;

/// One asset held by the account.
///
/// Amounts stay as the exchange sent them; parsing happens once, during
/// valuation, through [`parse_decimal_or_zero`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetBalance {
    pub symbol: String,
    pub available: String,
    pub in_order: String,
}

impl AssetBalance {
    pub fn new(
        symbol: impl Into<String>,
        available: impl Into<String>,
        in_order: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            available: available.into(),
            in_order: in_order.into(),
        }
    }

    pub fn available_amount(&self) -> Decimal {
        parse_decimal_or_zero(&self.available)
    }

    pub fn in_order_amount(&self) -> Decimal {
        parse_decimal_or_zero(&self.in_order)
    }
}
