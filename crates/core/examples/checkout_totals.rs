//! Cart and Totals Example
//!
//! Builds a small cart, applies a voucher percentage, and prints the
//! resulting receipt.

use jiff::Timestamp;
use shearflow::{
    cart::{Cart, ItemKind, LineMetadata},
    checkout::{DiscountSource, PaymentMethod, compute_totals},
    receipt::Receipt,
    vouchers::{VoucherCatalog, normalize_code},
};
use uuid::Uuid;

#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() {
    let shampoo = Uuid::now_v7();

    let mut cart = Cart::new();

    cart.add_item(shampoo, "Shampoo", 25_000, LineMetadata::Product);
    cart.update_quantity(shampoo, ItemKind::Product, 2);
    cart.add_item(
        Uuid::now_v7(),
        "Walk-in Haircut",
        20_000,
        LineMetadata::WalkIn { contact: None },
    );

    let catalog = VoucherCatalog::standard();
    let code = normalize_code(" shear20a ");

    let discount = match catalog.find(&code) {
        Some(voucher) => DiscountSource::Voucher {
            code,
            percent: voucher.discount_percent,
        },
        None => DiscountSource::None,
    };

    let totals = compute_totals(cart.subtotal(), &discount);

    let receipt = Receipt::new(
        Uuid::now_v7(),
        "Jane",
        cart.lines().to_vec(),
        totals,
        PaymentMethod::Cash,
        Timestamp::now(),
    );

    println!("{}", receipt.render());
}
