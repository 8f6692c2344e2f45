//! Product Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inventory product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,

    pub name: String,

    /// Price per unit in minor units.
    pub price: u64,

    /// Units on hand; never negative.
    pub stock: u32,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    pub id: Uuid,
    pub name: String,
    pub price: u64,
    pub stock: u32,
}

/// Product Update Model
///
/// Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}
