//! Checkout engine.
//!
//! Converts the cart plus operator input into a persisted order, its side
//! effects, and a receipt. The commit sequence after the order record is
//! written is an explicit ordered list of steps, each marked critical or
//! best-effort, executed by a small runner: critical failures abort the
//! checkout, best-effort failures are logged and skipped so an already
//! committed order is never rolled back.

use std::sync::Arc;

use tracing::{Span, info, warn};
use uuid::Uuid;

use shearflow::{
    cart::{Cart, CartLine, LineMetadata},
    checkout::{DiscountSource, compute_totals},
    receipt::Receipt,
};

use crate::{
    checkout::{
        errors::CheckoutError,
        models::{CheckoutInput, PlacedOrder},
    },
    domain::{
        orders::{NewOrder, OrderLineRecord, OrderRecord, OrderStatus, OrdersService},
        products::ProductsService,
        sales::{NewSale, SalesService},
        vouchers::{ValidatedVoucher, VoucherService},
    },
};

/// One action in the post-order commit sequence.
#[derive(Debug)]
enum CommitAction {
    InsertLines(Vec<OrderLineRecord>),
    RecordSale(NewSale),
    DecrementStock { product_id: Uuid, quantity: u32 },
    ConsumeVoucher(String),
}

/// One ordered step of the commit sequence.
#[derive(Debug)]
struct CommitStep {
    name: &'static str,
    critical: bool,
    action: CommitAction,
}

impl CommitStep {
    fn critical(name: &'static str, action: CommitAction) -> Self {
        Self {
            name,
            critical: true,
            action,
        }
    }

    fn best_effort(name: &'static str, action: CommitAction) -> Self {
        Self {
            name,
            critical: false,
            action,
        }
    }
}

/// Converts a cart into a persisted order plus its side effects.
#[derive(Clone)]
pub struct CheckoutEngine {
    orders: Arc<dyn OrdersService>,
    sales: Arc<dyn SalesService>,
    products: Arc<dyn ProductsService>,
    vouchers: VoucherService,
}

impl CheckoutEngine {
    #[must_use]
    pub fn new(
        orders: Arc<dyn OrdersService>,
        sales: Arc<dyn SalesService>,
        products: Arc<dyn ProductsService>,
        vouchers: VoucherService,
    ) -> Self {
        Self {
            orders,
            sales,
            products,
            vouchers,
        }
    }

    /// Submit a checkout.
    ///
    /// The cart is borrowed and never mutated; the caller clears it after a
    /// successful submission. Validation and voucher failures block every
    /// write; once the order record is committed, only critical follow-up
    /// steps can still fail the checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingCustomerName`] or
    /// [`CheckoutError::EmptyCart`] on invalid input,
    /// [`CheckoutError::Voucher`] when the supplied code is rejected, and
    /// [`CheckoutError::Backend`] when a critical write fails.
    #[tracing::instrument(
        name = "checkout.submit",
        skip(self, cart, input),
        fields(order_id = tracing::field::Empty),
        err
    )]
    pub async fn submit(
        &self,
        cart: &Cart,
        input: CheckoutInput,
    ) -> Result<PlacedOrder, CheckoutError> {
        let customer_name = input.customer_name.trim();

        if customer_name.is_empty() {
            return Err(CheckoutError::MissingCustomerName);
        }

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let voucher = match input.voucher_code.as_deref() {
            Some(code) => Some(self.vouchers.validate(code).await?),
            None => None,
        };

        let discount = discount_source(voucher.as_ref(), input.flat_discount);
        let totals = compute_totals(cart.subtotal(), &discount);

        let order = self
            .orders
            .create_order(NewOrder {
                id: Uuid::now_v7(),
                customer_name: customer_name.to_string(),
                subtotal: totals.subtotal,
                discount: totals.discount,
                total: totals.total,
                payment_method: input.payment_method,
                voucher_code: voucher.as_ref().map(|v| v.code.clone()),
                stylist_id: input.stylist_id,
                notes: input.notes,
                status: OrderStatus::Completed,
            })
            .await?;

        Span::current().record("order_id", tracing::field::display(order.id));

        let lines: Vec<OrderLineRecord> = cart
            .iter()
            .map(|line| OrderLineRecord::from_cart_line(order.id, line))
            .collect();

        let steps = commit_steps(&order, &lines, cart.lines(), voucher.as_ref());

        self.run_commit(steps).await?;

        info!(order_id = %order.id, total = order.total, "order placed");

        let receipt = Receipt::new(
            order.id,
            order.customer_name.clone(),
            cart.lines().to_vec(),
            totals,
            order.payment_method,
            order.created_at,
        );

        Ok(PlacedOrder {
            order,
            lines,
            receipt,
        })
    }

    async fn run_commit(&self, steps: Vec<CommitStep>) -> Result<(), CheckoutError> {
        for step in steps {
            match self.apply(step.action).await {
                Ok(()) => {}
                Err(error) if step.critical => return Err(error),
                Err(error) => {
                    warn!(step = step.name, %error, "non-critical commit step failed");
                }
            }
        }

        Ok(())
    }

    async fn apply(&self, action: CommitAction) -> Result<(), CheckoutError> {
        match action {
            CommitAction::InsertLines(lines) => {
                self.orders.insert_lines(lines).await?;
            }
            CommitAction::RecordSale(sale) => {
                self.sales.record_sale(sale).await?;
            }
            CommitAction::DecrementStock {
                product_id,
                quantity,
            } => {
                self.products.decrement_stock(product_id, quantity).await?;
            }
            CommitAction::ConsumeVoucher(code) => {
                self.vouchers.mark_used(&code).await?;
            }
        }

        Ok(())
    }
}

/// Build the ordered commit sequence for a just-written order record.
///
/// The sales record is written as a critical step: reporting is the system
/// of record for revenue, so a failed write aborts checkout before any
/// stock mutation. Stock decrements and voucher consumption never void an
/// order that already exists.
fn commit_steps(
    order: &OrderRecord,
    lines: &[OrderLineRecord],
    cart_lines: &[CartLine],
    voucher: Option<&ValidatedVoucher>,
) -> Vec<CommitStep> {
    let mut steps = vec![
        CommitStep::critical("order lines", CommitAction::InsertLines(lines.to_vec())),
        CommitStep::critical(
            "sales record",
            CommitAction::RecordSale(NewSale {
                id: Uuid::now_v7(),
                customer_name: order.customer_name.clone(),
                service_summary: service_summary(cart_lines),
                price: order.total,
                payment_method: order.payment_method,
                transaction_date: order.created_at,
                order_id: order.id,
            }),
        ),
    ];

    for line in cart_lines {
        match &line.metadata {
            LineMetadata::Product => {
                steps.push(CommitStep::best_effort(
                    "product stock",
                    CommitAction::DecrementStock {
                        product_id: line.item_id,
                        quantity: line.quantity,
                    },
                ));
            }
            LineMetadata::Service { products_used } => {
                // One unit of each consumed product per unit of service.
                for product_id in products_used {
                    steps.push(CommitStep::best_effort(
                        "service stock",
                        CommitAction::DecrementStock {
                            product_id: *product_id,
                            quantity: line.quantity,
                        },
                    ));
                }
            }
            LineMetadata::WalkIn { .. } => {}
        }
    }

    if let Some(voucher) = voucher {
        steps.push(CommitStep::best_effort(
            "voucher",
            CommitAction::ConsumeVoucher(voucher.code.clone()),
        ));
    }

    steps
}

/// Comma-joined line names for the flattened sales record.
fn service_summary(lines: &[CartLine]) -> String {
    lines
        .iter()
        .map(|line| line.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn discount_source(voucher: Option<&ValidatedVoucher>, flat: Option<u64>) -> DiscountSource {
    match (voucher, flat) {
        (Some(voucher), _) => DiscountSource::Voucher {
            code: voucher.code.clone(),
            percent: voucher.discount_percent,
        },
        (None, Some(amount)) => DiscountSource::Flat(amount),
        (None, None) => DiscountSource::None,
    }
}
