//! Checkout Totals
//!
//! The money breakdown of an order: subtotal, discount and amount payable.
//! Discounts come from either a validated voucher percentage or a flat peso
//! amount entered at the counter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::percent_of_minor;

/// Payment method accepted at the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash over the counter.
    Cash,

    /// GCash mobile wallet transfer.
    Gcash,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Gcash => "gcash",
        };

        f.write_str(label)
    }
}

/// Where the discount on an order comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountSource {
    /// No discount.
    None,

    /// A validated voucher's percentage markdown.
    Voucher {
        /// Normalised voucher code.
        code: String,

        /// Percentage taken off the subtotal, 0–100.
        percent: u8,
    },

    /// A flat amount entered at the counter, in minor units.
    Flat(u64),
}

/// Computed money breakdown of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum over lines of unit price times quantity.
    pub subtotal: u64,

    /// Amount taken off the subtotal; never exceeds it.
    pub discount: u64,

    /// Amount payable: subtotal minus discount.
    pub total: u64,
}

/// Compute the order totals for a subtotal and a discount source.
///
/// The discount is clamped to the subtotal whatever its source, so the
/// total can never go negative regardless of what the UI allowed the
/// operator to enter.
#[must_use]
pub fn compute_totals(subtotal: u64, source: &DiscountSource) -> Totals {
    let discount = match source {
        DiscountSource::None => 0,
        DiscountSource::Voucher { percent, .. } => percent_of_minor(*percent, subtotal),
        DiscountSource::Flat(amount) => *amount,
    };

    let discount = discount.min(subtotal);

    Totals {
        subtotal,
        discount,
        total: subtotal - discount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_discount_keeps_the_subtotal() {
        let totals = compute_totals(25_000, &DiscountSource::None);

        assert_eq!(
            totals,
            Totals {
                subtotal: 25_000,
                discount: 0,
                total: 25_000,
            }
        );
    }

    #[test]
    fn voucher_percent_discount() {
        let source = DiscountSource::Voucher {
            code: "SHEAR20A".to_string(),
            percent: 20,
        };

        let totals = compute_totals(20_000, &source);

        assert_eq!(totals.discount, 4_000);
        assert_eq!(totals.total, 16_000);
    }

    #[test]
    fn flat_discount_within_subtotal() {
        let totals = compute_totals(10_000, &DiscountSource::Flat(2_500));

        assert_eq!(totals.discount, 2_500);
        assert_eq!(totals.total, 7_500);
    }

    #[test]
    fn flat_discount_is_clamped_to_the_subtotal() {
        let totals = compute_totals(10_000, &DiscountSource::Flat(15_000));

        assert_eq!(totals.discount, 10_000);
        assert_eq!(totals.total, 0);
    }

    #[test]
    fn oversized_percent_is_clamped_to_the_subtotal() {
        let source = DiscountSource::Voucher {
            code: "BROKEN".to_string(),
            percent: 150,
        };

        let totals = compute_totals(10_000, &source);

        assert_eq!(totals.discount, 10_000);
        assert_eq!(totals.total, 0);
    }

    #[test]
    fn zero_subtotal_stays_zero() {
        let source = DiscountSource::Voucher {
            code: "SHEAR20A".to_string(),
            percent: 20,
        };

        let totals = compute_totals(0, &source);

        assert_eq!(
            totals,
            Totals {
                subtotal: 0,
                discount: 0,
                total: 0,
            }
        );
    }

    #[test]
    fn payment_method_displays_lowercase() {
        assert_eq!(PaymentMethod::Cash.to_string(), "cash");
        assert_eq!(PaymentMethod::Gcash.to_string(), "gcash");
    }
}
