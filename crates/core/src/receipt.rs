//! Receipt
//!
//! Printable projection of a committed order. Building and rendering a
//! receipt has no side effects and may be repeated on the same order.

use std::io;

use jiff::Timestamp;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    cart::CartLine,
    checkout::{PaymentMethod, Totals},
    money::format_minor,
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Human-readable order number for a persisted order.
///
/// Derived from the order's own identifier, so it is exactly as unique as
/// the order record itself.
#[must_use]
pub fn order_number(order_id: Uuid) -> String {
    let simple = order_id.simple().to_string();
    let digits = simple.get(..8).unwrap_or(&simple);

    format!("SF-{}", digits.to_uppercase())
}

/// Printable projection of a committed order.
#[derive(Debug, Clone)]
pub struct Receipt {
    order_number: String,
    customer_name: String,
    lines: Vec<CartLine>,
    totals: Totals,
    payment_method: PaymentMethod,
    placed_at: Timestamp,
}

impl Receipt {
    /// Build the receipt view for a committed order.
    #[must_use]
    pub fn new(
        order_id: Uuid,
        customer_name: impl Into<String>,
        lines: Vec<CartLine>,
        totals: Totals,
        payment_method: PaymentMethod,
        placed_at: Timestamp,
    ) -> Self {
        Receipt {
            order_number: order_number(order_id),
            customer_name: customer_name.into(),
            lines,
            totals,
            payment_method,
            placed_at,
        }
    }

    /// The derived order number, e.g. `SF-01H2K3M4`.
    #[must_use]
    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// Customer the order was placed for.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// The purchased lines, in cart display order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total cost before the discount.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.totals.subtotal
    }

    /// Amount taken off the subtotal.
    #[must_use]
    pub fn discount(&self) -> u64 {
        self.totals.discount
    }

    /// Amount paid.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.totals.total
    }

    /// How the order was paid.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// When the order was committed.
    #[must_use]
    pub fn placed_at(&self) -> Timestamp {
        self.placed_at
    }

    /// Render the receipt as printable text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("SHEARFLOW\n");
        out.push_str("Salon Management System\n\n");
        out.push_str(&format!("Order #: {}\n", self.order_number));
        out.push_str(&format!("Date: {}\n", self.placed_at));
        out.push_str(&format!("Customer: {}\n", self.customer_name));
        out.push_str(&format!("Payment: {}\n\n", self.payment_method));
        out.push_str(&self.lines_table());
        out.push_str(&format!(
            "\n\nSubtotal: {}\n",
            format_minor(self.totals.subtotal)
        ));

        if self.totals.discount > 0 {
            out.push_str(&format!(
                "Discount: -{}\n",
                format_minor(self.totals.discount)
            ));
        }

        out.push_str(&format!("TOTAL: {}\n", format_minor(self.totals.total)));
        out.push_str("\nThank you for choosing ShearFlow!\n");

        out
    }

    /// Write the rendered receipt.
    ///
    /// # Errors
    ///
    /// Returns a [`ReceiptError`] if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        out.write_all(self.render().as_bytes())
            .map_err(|_err| ReceiptError::IO)
    }

    fn lines_table(&self) -> String {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Unit", "Amount"]);

        for line in &self.lines {
            builder.push_record([
                line.name.clone(),
                line.quantity.to_string(),
                format_minor(line.unit_price),
                format_minor(line.amount()),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..), Alignment::right());

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::cart::LineMetadata;

    use super::*;

    fn test_receipt() -> Result<Receipt, jiff::Error> {
        let lines = vec![CartLine {
            item_id: Uuid::from_u128(1),
            name: "Shampoo".to_string(),
            unit_price: 25_000,
            quantity: 2,
            metadata: LineMetadata::Product,
        }];

        let totals = Totals {
            subtotal: 50_000,
            discount: 10_000,
            total: 40_000,
        };

        Ok(Receipt::new(
            Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef),
            "Jane",
            lines,
            totals,
            PaymentMethod::Cash,
            "2026-08-05T10:00:00Z".parse::<Timestamp>()?,
        ))
    }

    #[test]
    fn order_number_uses_leading_uuid_digits() {
        let id = Uuid::from_u128(0x0123_4567_0000_0000_0000_0000_0000_0000);

        assert_eq!(order_number(id), "SF-01234567");
    }

    #[test]
    fn order_number_is_deterministic() {
        let id = Uuid::from_u128(42);

        assert_eq!(order_number(id), order_number(id));
    }

    #[test]
    fn render_shows_totals_and_customer() -> TestResult {
        let rendered = test_receipt()?.render();

        assert!(rendered.contains("Customer: Jane"), "missing customer name");
        assert!(rendered.contains("Shampoo"), "missing line item");
        assert!(rendered.contains("₱500.00"), "missing subtotal");
        assert!(rendered.contains("-₱100.00"), "missing discount");
        assert!(rendered.contains("TOTAL: ₱400.00"), "missing total");

        Ok(())
    }

    #[test]
    fn render_omits_zero_discount() -> TestResult {
        let receipt = Receipt::new(
            Uuid::from_u128(7),
            "Jane",
            Vec::new(),
            Totals {
                subtotal: 0,
                discount: 0,
                total: 0,
            },
            PaymentMethod::Gcash,
            "2026-08-05T10:00:00Z".parse::<Timestamp>()?,
        );

        assert!(!receipt.render().contains("Discount"), "unexpected discount line");

        Ok(())
    }

    #[test]
    fn render_is_idempotent() -> TestResult {
        let receipt = test_receipt()?;

        assert_eq!(receipt.render(), receipt.render());

        Ok(())
    }

    #[test]
    fn lines_round_trip_metadata() -> TestResult {
        let used = vec![Uuid::from_u128(9)];

        let receipt = Receipt::new(
            Uuid::from_u128(7),
            "Jane",
            vec![CartLine {
                item_id: Uuid::from_u128(2),
                name: "Hair Spa".to_string(),
                unit_price: 50_000,
                quantity: 1,
                metadata: LineMetadata::Service {
                    products_used: used.clone(),
                },
            }],
            Totals {
                subtotal: 50_000,
                discount: 0,
                total: 50_000,
            },
            PaymentMethod::Cash,
            "2026-08-05T10:00:00Z".parse::<Timestamp>()?,
        );

        assert!(matches!(
            receipt.lines().first().map(|line| &line.metadata),
            Some(LineMetadata::Service { products_used }) if *products_used == used
        ));

        Ok(())
    }

    #[test]
    fn write_to_matches_render() -> TestResult {
        let receipt = test_receipt()?;
        let mut buffer = Vec::new();

        receipt.write_to(&mut buffer)?;

        assert_eq!(String::from_utf8(buffer)?, receipt.render());

        Ok(())
    }
}
