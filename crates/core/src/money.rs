//! Money
//!
//! All prices and totals are carried as integer minor units (centavos).
//! Conversion to pesos happens only at display points; accumulation never
//! rounds intermediate values.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};

/// Currency used across the engine.
pub const CURRENCY: &iso::Currency = iso::PHP;

/// Format an amount of minor units as a peso string, e.g. `₱400.00`.
#[must_use]
pub fn format_minor(minor: u64) -> String {
    let minor = i64::try_from(minor).unwrap_or(i64::MAX);

    Money::from_minor(minor, CURRENCY).to_string()
}

/// Calculate `percent` of a minor-unit amount, rounded half-away-from-zero
/// to whole minor units.
#[must_use]
pub fn percent_of_minor(percent: u8, minor: u64) -> u64 {
    let fraction = Decimal::from(percent) / Decimal::from(100_u8);
    let applied = fraction * Decimal::from(minor);

    applied
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_percent_of_subtotal() {
        assert_eq!(percent_of_minor(20, 50_000), 10_000);
    }

    #[test]
    fn zero_percent_is_zero() {
        assert_eq!(percent_of_minor(0, 50_000), 0);
    }

    #[test]
    fn hundred_percent_is_whole_amount() {
        assert_eq!(percent_of_minor(100, 12_345), 12_345);
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        // 15% of 105 minor units is 15.75, which rounds to 16.
        assert_eq!(percent_of_minor(15, 105), 16);

        // 25% of 2 minor units is 0.5, which rounds to 1.
        assert_eq!(percent_of_minor(25, 2), 1);
    }

    #[test]
    fn formats_pesos_with_two_decimals() {
        assert_eq!(format_minor(40_000), "₱400.00");
    }

    #[test]
    fn formats_thousands_separator() {
        assert_eq!(format_minor(123_456), "₱1,234.56");
    }

    #[test]
    fn formats_zero() {
        assert_eq!(format_minor(0), "₱0.00");
    }
}
