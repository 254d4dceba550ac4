/// Fiat currency used for valuation when none is configured
pub const DEFAULT_FIAT_CURRENCY: &str = "EUR";

/// Separator between base and quote symbol in a market identifier ("BTC-EUR")
pub const MARKET_SEPARATOR: char = '-';

/// Refresh interval for the fetch-and-value cycle, in seconds
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 60;

