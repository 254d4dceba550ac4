use log::{debug, warn};
use rust_decimal::Decimal;

use crate::balances::AssetBalance;
use crate::prices::PriceQuote;
use crate::utils::{parse_decimal_or_zero, saturating_sum};

use super::{AssetValuation, PortfolioSnapshot, PriceLookup};

/// Builds the fiat price table from the raw quotes.
///
/// Only markets quoted in `fiat_currency` are kept, keyed by their base
/// symbol. When a base symbol appears more than once the later quote wins.
/// Unparseable prices are recorded as zero.
pub fn build_price_lookup(quotes: &[PriceQuote], fiat_currency: &str) -> PriceLookup {
    let mut lookup = PriceLookup::with_capacity(quotes.len());
    for quote in quotes {
        if let Some(symbol) = quote.base_symbol_in(fiat_currency) {
            lookup.insert(symbol.to_string(), parse_decimal_or_zero(&quote.price));
        }
    }
    lookup
}

/// Values the account in `fiat_currency`.
///
/// This never fails: missing quotes, missing fiat balance and malformed
/// amounts all degrade to zero.
pub fn value_portfolio(
    balances: &[AssetBalance],
    quotes: &[PriceQuote],
    fiat_currency: &str,
) -> PortfolioSnapshot {
    value_portfolio_with_prices(balances, quotes, fiat_currency).0
}

/// Same as [`value_portfolio`], also returning the price table it used.
pub fn value_portfolio_with_prices(
    balances: &[AssetBalance],
    quotes: &[PriceQuote],
    fiat_currency: &str,
) -> (PortfolioSnapshot, PriceLookup) {
    let prices = build_price_lookup(quotes, fiat_currency);
    let snapshot = value_with_lookup(balances, &prices, fiat_currency);
    (snapshot, prices)
}

/// Values the balances against an already built price table.
pub fn value_with_lookup(
    balances: &[AssetBalance],
    prices: &PriceLookup,
    fiat_currency: &str,
) -> PortfolioSnapshot {
    // Last fiat entry wins if the exchange ever repeats it.
    let (fiat_available, fiat_in_orders) = balances
        .iter()
        .rev()
        .find(|b| b.symbol == fiat_currency)
        .map(|b| (b.available_amount(), b.in_order_amount()))
        .unwrap_or((Decimal::ZERO, Decimal::ZERO));

    let asset_valuations: Vec<AssetValuation> = balances
        .iter()
        .filter(|b| b.symbol != fiat_currency)
        .map(|b| value_asset(b, prices))
        .collect();

    // Outside the Decimal range the total pins to MAX and stops being the
    // exact sum of its parts.
    let total_value = saturating_sum(
        asset_valuations
            .iter()
            .map(|v| v.fiat_value)
            .chain([fiat_available, fiat_in_orders]),
    );

    PortfolioSnapshot {
        fiat_currency: fiat_currency.to_string(),
        fiat_available,
        fiat_in_orders,
        asset_count: asset_valuations.len(),
        asset_valuations,
        total_value,
    }
}

fn value_asset(balance: &AssetBalance, prices: &PriceLookup) -> AssetValuation {
    let available = balance.available_amount();
    let in_order = balance.in_order_amount();

    let price = match prices.get(&balance.symbol) {
        Some(price) => *price,
        None => {
            debug!(
                "No fiat quote for {}. Asset value treated as ZERO.",
                balance.symbol
            );
            Decimal::ZERO
        }
    };

    let fiat_value = available
        .checked_add(in_order)
        .and_then(|quantity| quantity.checked_mul(price))
        .unwrap_or_else(|| {
            warn!(
                "Valuation of {} overflowed. Asset value treated as ZERO.",
                balance.symbol
            );
            Decimal::ZERO
        });

    AssetValuation {
        symbol: balance.symbol.clone(),
        available,
        in_order,
        fiat_value,
    }
}
