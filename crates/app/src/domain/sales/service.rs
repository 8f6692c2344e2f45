//! Sales service.

use async_trait::async_trait;
use jiff::civil::Date;
use mockall::automock;
use tokio::sync::Mutex;

use crate::{
    domain::sales::models::{DailySummary, NewSale, SalesRecord, summarize_for},
    hosted::{BackendError, HostedTables},
};

const SALES_TABLE: &str = "sales";

#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Persist the reporting record for a committed order.
    async fn record_sale(&self, sale: NewSale) -> Result<SalesRecord, BackendError>;

    /// All sales records, in transaction order.
    async fn list_sales(&self) -> Result<Vec<SalesRecord>, BackendError>;

    /// Takings for one calendar date (UTC).
    async fn daily_summary(&self, date: Date) -> Result<DailySummary, BackendError>;
}

/// Sales service backed by the hosted `sales` table.
#[derive(Debug, Clone)]
pub struct HostedSalesService {
    tables: HostedTables,
}

impl HostedSalesService {
    #[must_use]
    pub fn new(tables: HostedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl SalesService for HostedSalesService {
    async fn record_sale(&self, sale: NewSale) -> Result<SalesRecord, BackendError> {
        self.tables.insert(SALES_TABLE, &sale).await
    }

    async fn list_sales(&self) -> Result<Vec<SalesRecord>, BackendError> {
        self.tables.list(SALES_TABLE, Some("transaction_date")).await
    }

    async fn daily_summary(&self, date: Date) -> Result<DailySummary, BackendError> {
        let records = self.list_sales().await?;

        Ok(summarize_for(&records, date))
    }
}

/// In-memory sales service for local wiring and tests.
#[derive(Debug, Default)]
pub struct MemorySalesService {
    records: Mutex<Vec<SalesRecord>>,
}

#[async_trait]
impl SalesService for MemorySalesService {
    async fn record_sale(&self, sale: NewSale) -> Result<SalesRecord, BackendError> {
        let record = SalesRecord {
            id: sale.id,
            customer_name: sale.customer_name,
            service_summary: sale.service_summary,
            price: sale.price,
            payment_method: sale.payment_method,
            transaction_date: sale.transaction_date,
            order_id: sale.order_id,
        };

        self.records.lock().await.push(record.clone());

        Ok(record)
    }

    async fn list_sales(&self) -> Result<Vec<SalesRecord>, BackendError> {
        let mut records = self.records.lock().await.clone();

        records.sort_by_key(|record| record.transaction_date);

        Ok(records)
    }

    async fn daily_summary(&self, date: Date) -> Result<DailySummary, BackendError> {
        let records = self.list_sales().await?;

        Ok(summarize_for(&records, date))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use shearflow::checkout::PaymentMethod;
    use testresult::TestResult;
    use uuid::Uuid;

    use super::*;

    fn sale(at: &str, price: u64) -> Result<NewSale, jiff::Error> {
        Ok(NewSale {
            id: Uuid::now_v7(),
            customer_name: "Jane".to_string(),
            service_summary: "Shampoo, Hair Spa".to_string(),
            price,
            payment_method: PaymentMethod::Gcash,
            transaction_date: at.parse()?,
            order_id: Uuid::now_v7(),
        })
    }

    #[tokio::test]
    async fn record_sale_round_trips() -> TestResult {
        let service = MemorySalesService::default();

        let recorded = service.record_sale(sale("2026-08-05T09:00:00Z", 40_000)?).await?;

        assert_eq!(recorded.price, 40_000);
        assert_eq!(recorded.service_summary, "Shampoo, Hair Spa");

        let listed = service.list_sales().await?;

        assert_eq!(listed.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn daily_summary_aggregates_the_day() -> TestResult {
        let service = MemorySalesService::default();

        service.record_sale(sale("2026-08-05T09:00:00Z", 40_000)?).await?;
        service.record_sale(sale("2026-08-05T17:00:00Z", 10_000)?).await?;
        service.record_sale(sale("2026-08-07T09:00:00Z", 77_000)?).await?;

        let summary = service.daily_summary(date(2026, 8, 5)).await?;

        assert_eq!(summary.transaction_count, 2);
        assert_eq!(summary.gross, 50_000);

        Ok(())
    }

    #[tokio::test]
    async fn list_sales_sorts_by_transaction_time() -> TestResult {
        let service = MemorySalesService::default();

        service.record_sale(sale("2026-08-05T17:00:00Z", 2)?).await?;
        service.record_sale(sale("2026-08-05T09:00:00Z", 1)?).await?;

        let prices: Vec<u64> = service
            .list_sales()
            .await?
            .into_iter()
            .map(|record| record.price)
            .collect();

        assert_eq!(prices, vec![1, 2]);

        Ok(())
    }
}
