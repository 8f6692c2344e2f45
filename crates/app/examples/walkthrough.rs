//! In-memory Checkout Walkthrough
//!
//! Seeds the in-memory catalog, places an order with a voucher, and prints
//! the receipt plus the day's sales summary.

use jiff::{Timestamp, tz::TimeZone};
use shearflow::{
    cart::{Cart, ItemKind, LineMetadata},
    checkout::PaymentMethod,
    money::format_minor,
};
use shearflow_app::{
    checkout::CheckoutInput,
    context::AppContext,
    domain::products::NewProduct,
};
use uuid::Uuid;

#[expect(clippy::print_stdout, reason = "Example program output to user")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = AppContext::in_memory();

    let shampoo = ctx
        .products
        .create_product(NewProduct {
            id: Uuid::now_v7(),
            name: "Shampoo".to_string(),
            price: 25_000,
            stock: 10,
        })
        .await?;

    let mut cart = Cart::new();

    cart.add_item(shampoo.id, shampoo.name.clone(), shampoo.price, LineMetadata::Product);
    cart.update_quantity(shampoo.id, ItemKind::Product, 2);

    let mut input = CheckoutInput::new("Jane", PaymentMethod::Cash);
    input.voucher_code = Some("SHEAR20A".to_string());

    let placed = ctx.checkout.submit(&cart, input).await?;

    cart.clear();

    println!("{}", placed.receipt.render());

    let today = Timestamp::now().to_zoned(TimeZone::UTC).date();
    let summary = ctx.sales.daily_summary(today).await?;

    println!(
        "{} transaction(s) today, gross {}",
        summary.transaction_count,
        format_minor(summary.gross)
    );

    let restocked = ctx.products.get_product(shampoo.id).await?;

    println!("Shampoo stock after sale: {}", restocked.stock);

    Ok(())
}
