//! Order Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use shearflow::{
    cart::{CartLine, ItemKind, LineMetadata},
    checkout::PaymentMethod,
};
use uuid::Uuid;

/// Lifecycle state of a persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Paid and finished at the counter.
    Completed,
}

/// Persisted order record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: Uuid,

    pub customer_name: String,

    /// Sum over lines of unit price times quantity, in minor units.
    pub subtotal: u64,

    /// Amount taken off the subtotal, in minor units.
    pub discount: u64,

    /// Amount paid, in minor units.
    pub total: u64,

    pub payment_method: PaymentMethod,

    pub voucher_code: Option<String>,

    pub stylist_id: Option<Uuid>,

    pub notes: Option<String>,

    pub status: OrderStatus,

    pub created_at: Timestamp,
}

/// Insert payload for an order.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub id: Uuid,
    pub customer_name: String,
    pub subtotal: u64,
    pub discount: u64,
    pub total: u64,
    pub payment_method: PaymentMethod,
    pub voucher_code: Option<String>,
    pub stylist_id: Option<Uuid>,
    pub notes: Option<String>,
    pub status: OrderStatus,
}

/// Persisted order line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub id: Uuid,

    pub order_id: Uuid,

    pub item_id: Uuid,

    pub kind: ItemKind,

    pub name: String,

    /// Price per unit in minor units.
    pub unit_price: u64,

    pub quantity: u32,

    /// Per-kind payload carried over from the cart line.
    pub metadata: LineMetadata,
}

impl OrderLineRecord {
    /// Build the persisted line for one cart line of an order.
    #[must_use]
    pub fn from_cart_line(order_id: Uuid, line: &CartLine) -> Self {
        OrderLineRecord {
            id: Uuid::now_v7(),
            order_id,
            item_id: line.item_id,
            kind: line.kind(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            metadata: line.metadata.clone(),
        }
    }
}
