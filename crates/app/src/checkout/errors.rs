//! Checkout errors.

use thiserror::Error;

use crate::{
    domain::{products::ProductsServiceError, vouchers::VouchersServiceError},
    hosted::BackendError,
};

/// Errors surfaced by [`CheckoutEngine::submit`].
///
/// Validation and voucher failures happen before any write; a `Backend`
/// failure aborts the checkout with the cart preserved so the operator can
/// retry.
///
/// [`CheckoutEngine::submit`]: crate::checkout::CheckoutEngine::submit
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Customer name missing or blank after trimming.
    #[error("customer name is required")]
    MissingCustomerName,

    /// Checkout cannot proceed on an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The supplied voucher code was rejected.
    #[error(transparent)]
    Voucher(#[from] VouchersServiceError),

    /// A critical backend write failed after validation.
    #[error("backend write failed")]
    Backend(#[from] BackendError),

    /// A stock update failed during the commit sequence.
    ///
    /// Stock updates run as best-effort steps, so this never escapes
    /// `submit`; it exists so the commit runner has a uniform error type to
    /// log.
    #[error("stock update failed")]
    Stock(#[from] ProductsServiceError),
}
