pub mod decimal_utils;

pub use decimal_utils::{parse_decimal_or_zero, saturating_sum};
