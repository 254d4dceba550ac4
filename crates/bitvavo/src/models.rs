//! Wire types for the Bitvavo REST API.

use coinfolio_core::{AssetBalance, PriceQuote};
use serde::Deserialize;

/// Entry of `GET /balance`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceEntry {
    pub symbol: String,
    #[serde(default)]
    pub available: String,
    #[serde(default)]
    pub in_order: String,
}

impl From<BalanceEntry> for AssetBalance {
    fn from(entry: BalanceEntry) -> Self {
        AssetBalance::new(entry.symbol, entry.available, entry.in_order)
    }
}

/// Entry of `GET /ticker/price`. Markets that are halted come without a price.
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub market: String,
    #[serde(default)]
    pub price: Option<String>,
}

impl From<TickerPrice> for PriceQuote {
    fn from(ticker: TickerPrice) -> Self {
        PriceQuote::new(ticker.market, ticker.price.unwrap_or_default())
    }
}

/// Error body returned with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_balance_list() {
        let json = r#"[
            {"symbol":"EUR","available":"1000","inOrder":"0"},
            {"symbol":"BTC","available":"0.5","inOrder":"0.1"},
            {"symbol":"XRP","available":"100"}
        ]"#;
        let entries: Vec<BalanceEntry> = serde_json::from_str(json).unwrap();
        let balances: Vec<AssetBalance> = entries.into_iter().map(AssetBalance::from).collect();

        assert_eq!(balances.len(), 3);
        assert_eq!(balances[1], AssetBalance::new("BTC", "0.5", "0.1"));
        assert_eq!(balances[2].in_order, "");
    }

    #[test]
    fn decodes_ticker_without_price() {
        let json = r#"[{"market":"BTC-EUR","price":"40000"},{"market":"LUNA-EUR"}]"#;
        let tickers: Vec<TickerPrice> = serde_json::from_str(json).unwrap();
        let quotes: Vec<PriceQuote> = tickers.into_iter().map(PriceQuote::from).collect();

        assert_eq!(quotes[0], PriceQuote::new("BTC-EUR", "40000"));
        assert_eq!(quotes[1], PriceQuote::new("LUNA-EUR", ""));
    }

    #[test]
    fn rejects_non_list_payload() {
        let json = r#"{"errorCode":300,"error":"Authentication is required"}"#;
        assert!(serde_json::from_str::<Vec<BalanceEntry>>(json).is_err());
    }
}
