//! Orders service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tokio::sync::Mutex;

use crate::{
    domain::orders::models::{NewOrder, OrderLineRecord, OrderRecord},
    hosted::{BackendError, HostedTables},
};

const ORDERS_TABLE: &str = "orders";
const ORDER_ITEMS_TABLE: &str = "order_items";

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Persist a new order and return the stored record.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, BackendError>;

    /// Persist the line items belonging to an order.
    async fn insert_lines(&self, lines: Vec<OrderLineRecord>) -> Result<(), BackendError>;

    /// All orders, most recent first.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, BackendError>;
}

/// Orders service backed by the hosted `orders` and `order_items` tables.
#[derive(Debug, Clone)]
pub struct HostedOrdersService {
    tables: HostedTables,
}

impl HostedOrdersService {
    #[must_use]
    pub fn new(tables: HostedTables) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl OrdersService for HostedOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, BackendError> {
        self.tables.insert(ORDERS_TABLE, &order).await
    }

    async fn insert_lines(&self, lines: Vec<OrderLineRecord>) -> Result<(), BackendError> {
        for line in &lines {
            let _stored: OrderLineRecord = self.tables.insert(ORDER_ITEMS_TABLE, line).await?;
        }

        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, BackendError> {
        let mut orders: Vec<OrderRecord> =
            self.tables.list(ORDERS_TABLE, Some("created_at")).await?;

        orders.reverse();

        Ok(orders)
    }
}

/// In-memory orders service for local wiring and tests.
#[derive(Debug, Default)]
pub struct MemoryOrdersService {
    orders: Mutex<Vec<OrderRecord>>,
    lines: Mutex<Vec<OrderLineRecord>>,
}

impl MemoryOrdersService {
    /// Stored lines for a given order, in insertion order.
    pub async fn lines_for(&self, order_id: uuid::Uuid) -> Vec<OrderLineRecord> {
        self.lines
            .lock()
            .await
            .iter()
            .filter(|line| line.order_id == order_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrdersService for MemoryOrdersService {
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, BackendError> {
        let record = OrderRecord {
            id: order.id,
            customer_name: order.customer_name,
            subtotal: order.subtotal,
            discount: order.discount,
            total: order.total,
            payment_method: order.payment_method,
            voucher_code: order.voucher_code,
            stylist_id: order.stylist_id,
            notes: order.notes,
            status: order.status,
            created_at: Timestamp::now(),
        };

        self.orders.lock().await.push(record.clone());

        Ok(record)
    }

    async fn insert_lines(&self, lines: Vec<OrderLineRecord>) -> Result<(), BackendError> {
        self.lines.lock().await.extend(lines);

        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<OrderRecord>, BackendError> {
        let mut orders = self.orders.lock().await.clone();

        orders.reverse();

        Ok(orders)
    }
}
