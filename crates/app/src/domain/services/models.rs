//! Salon Service Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog entry for a bookable salon service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonService {
    pub id: Uuid,

    pub name: String,

    pub description: String,

    /// Price in minor units.
    pub price: u64,

    /// Inventory products consumed each time the service is performed.
    #[serde(default)]
    pub products_used: Vec<Uuid>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Salon Service Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSalonService {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub products_used: Vec<Uuid>,
}

/// Salon Service Update Model
///
/// Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalonServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub products_used: Option<Vec<Uuid>>,
}
