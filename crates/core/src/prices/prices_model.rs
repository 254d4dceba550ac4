use serde::{Deserialize, Serialize};

use crate::constants::MARKET_SEPARATOR;

/// Latest price of one market, e.g. `{"market": "BTC-EUR", "price": "40000"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub market: String,
    pub price: String,
}

impl PriceQuote {
    pub fn new(market: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            market: market.into(),
            price: price.into(),
        }
    }

    /// Base symbol of this market when it is quoted in `quote_currency`.
    ///
    /// `"BTC-EUR".base_symbol_in("EUR") == Some("BTC")`. Markets quoted in
    /// another currency, and markets with an empty base, yield `None`.
    pub fn base_symbol_in(&self, quote_currency: &str) -> Option<&str> {
        let base = self
            .market
            .strip_suffix(quote_currency)?
            .strip_suffix(MARKET_SEPARATOR)?;
        if base.is_empty() {
            None
        } else {
            Some(base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_base_for_matching_quote_currency() {
        assert_eq!(PriceQuote::new("BTC-EUR", "1").base_symbol_in("EUR"), Some("BTC"));
        assert_eq!(
            PriceQuote::new("1INCH-EUR", "1").base_symbol_in("EUR"),
            Some("1INCH")
        );
    }

    #[test]
    fn ignores_other_quote_currencies() {
        assert_eq!(PriceQuote::new("BTC-USDC", "1").base_symbol_in("EUR"), None);
        assert_eq!(PriceQuote::new("EURC-USDC", "1").base_symbol_in("EUR"), None);
    }

    #[test]
    fn requires_separator_and_base() {
        assert_eq!(PriceQuote::new("BTCEUR", "1").base_symbol_in("EUR"), None);
        assert_eq!(PriceQuote::new("-EUR", "1").base_symbol_in("EUR"), None);
        assert_eq!(PriceQuote::new("EUR", "1").base_symbol_in("EUR"), None);
    }
}
