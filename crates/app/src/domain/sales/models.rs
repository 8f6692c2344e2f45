//! Sales Models

use jiff::{Timestamp, civil::Date, tz::TimeZone};
use serde::{Deserialize, Serialize};
use shearflow::checkout::PaymentMethod;
use uuid::Uuid;

/// Flattened reporting record, derived 1:1 from a committed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesRecord {
    pub id: Uuid,

    pub customer_name: String,

    /// Comma-joined names of the purchased lines.
    pub service_summary: String,

    /// Order total in minor units.
    pub price: u64,

    pub payment_method: PaymentMethod,

    pub transaction_date: Timestamp,

    pub order_id: Uuid,
}

/// Insert payload for a sales record.
#[derive(Debug, Clone, Serialize)]
pub struct NewSale {
    pub id: Uuid,
    pub customer_name: String,
    pub service_summary: String,
    pub price: u64,
    pub payment_method: PaymentMethod,
    pub transaction_date: Timestamp,
    pub order_id: Uuid,
}

/// One day's takings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DailySummary {
    /// Number of transactions on the day.
    pub transaction_count: usize,

    /// Gross takings in minor units.
    pub gross: u64,
}

/// Roll records up into the summary for one calendar date (UTC).
#[must_use]
pub fn summarize_for(records: &[SalesRecord], date: Date) -> DailySummary {
    records
        .iter()
        .filter(|record| record.transaction_date.to_zoned(TimeZone::UTC).date() == date)
        .fold(DailySummary::default(), |summary, record| DailySummary {
            transaction_count: summary.transaction_count + 1,
            gross: summary.gross + record.price,
        })
}
