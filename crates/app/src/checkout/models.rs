//! Checkout Models

use shearflow::{checkout::PaymentMethod, receipt::Receipt};
use uuid::Uuid;

use crate::domain::orders::{OrderLineRecord, OrderRecord};

/// Operator-entered details for one checkout.
#[derive(Debug, Clone)]
pub struct CheckoutInput {
    /// Required; the checkout is rejected when this is blank after trimming.
    pub customer_name: String,

    pub payment_method: PaymentMethod,

    /// Single-use discount code. When present and valid it takes precedence
    /// over `flat_discount`.
    pub voucher_code: Option<String>,

    /// Flat peso discount in minor units; clamped to the subtotal.
    pub flat_discount: Option<u64>,

    pub stylist_id: Option<Uuid>,

    pub notes: Option<String>,
}

impl CheckoutInput {
    /// Input with just the required fields set.
    #[must_use]
    pub fn new(customer_name: impl Into<String>, payment_method: PaymentMethod) -> Self {
        CheckoutInput {
            customer_name: customer_name.into(),
            payment_method,
            voucher_code: None,
            flat_discount: None,
            stylist_id: None,
            notes: None,
        }
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone)]
pub struct PlacedOrder {
    /// The persisted order record.
    pub order: OrderRecord,

    /// The persisted line records, in cart display order.
    pub lines: Vec<OrderLineRecord>,

    /// Printable projection for the operator.
    pub receipt: Receipt,
}
