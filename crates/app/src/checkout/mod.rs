//! Checkout

pub mod engine;
pub mod errors;
pub mod models;

pub use engine::CheckoutEngine;
pub use errors::CheckoutError;
pub use models::*;
