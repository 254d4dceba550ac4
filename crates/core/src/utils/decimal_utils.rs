use log::{debug, warn};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses an exchange-supplied amount string into a [`Decimal`].
///
/// Exchanges send quantities and prices as strings. Anything that does not
/// parse (empty, garbage, NaN, out of range) becomes `Decimal::ZERO`, so one
/// malformed field degrades a single value instead of failing a snapshot.
/// Scientific notation ("1e-8") is accepted.
pub fn parse_decimal_or_zero(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or_else(|_| {
            debug!("Unparseable decimal '{}' treated as zero", raw);
            Decimal::ZERO
        })
}

/// Adds up `values`, clamping at `Decimal::MAX`/`Decimal::MIN` instead of
/// panicking when the running total leaves the representable range.
pub fn saturating_sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let mut overflowed = false;
    let total = values.into_iter().fold(Decimal::ZERO, |acc, value| {
        acc.checked_add(value).unwrap_or_else(|| {
            overflowed = true;
            acc.saturating_add(value)
        })
    });
    if overflowed {
        warn!("Decimal sum overflowed, saturated at {}", total);
    }
    total
}
