//! Voucher service.
//!
//! Validates operator-entered codes against the fixed catalog plus the
//! durable used-set, and consumes codes after a successful checkout.

use std::sync::Arc;

use shearflow::vouchers::{VoucherCatalog, VoucherError, normalize_code};
use thiserror::Error;
use tracing::info;

use crate::domain::vouchers::store::{VoucherUsageError, VoucherUsageStore};

/// Errors from voucher validation and consumption.
#[derive(Debug, Error)]
pub enum VouchersServiceError {
    /// The code was rejected by the registry rules.
    #[error(transparent)]
    Voucher(#[from] VoucherError),

    /// The used-set could not be consulted or updated.
    #[error("voucher usage store error")]
    Usage(#[from] VoucherUsageError),
}

/// A code that passed validation, ready to apply to a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedVoucher {
    /// Normalised (trimmed, uppercased) code.
    pub code: String,

    /// Percentage taken off the order subtotal, 0–100.
    pub discount_percent: u8,
}

/// Validates and consumes single-use voucher codes.
#[derive(Clone)]
pub struct VoucherService {
    catalog: VoucherCatalog,
    usage: Arc<dyn VoucherUsageStore>,
}

impl VoucherService {
    #[must_use]
    pub fn new(catalog: VoucherCatalog, usage: Arc<dyn VoucherUsageStore>) -> Self {
        Self { catalog, usage }
    }

    /// Validate operator input against the catalog and the used-set.
    ///
    /// Input is normalised before lookup, so ` shear20a ` and `SHEAR20A`
    /// resolve identically.
    ///
    /// # Errors
    ///
    /// Returns [`VoucherError::NotFound`] when the normalised code is not in
    /// the catalog, [`VoucherError::AlreadyUsed`] when it has been redeemed
    /// before, and [`VouchersServiceError::Usage`] when the used-set cannot
    /// be consulted.
    pub async fn validate(&self, input: &str) -> Result<ValidatedVoucher, VouchersServiceError> {
        let code = normalize_code(input);

        let Some(voucher) = self.catalog.find(&code) else {
            return Err(VoucherError::NotFound.into());
        };

        if self.usage.contains(&code).await? {
            return Err(VoucherError::AlreadyUsed.into());
        }

        Ok(ValidatedVoucher {
            code,
            discount_percent: voucher.discount_percent,
        })
    }

    /// Record a code as redeemed; idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error when the used-set cannot be updated.
    pub async fn mark_used(&self, code: &str) -> Result<(), VouchersServiceError> {
        let code = normalize_code(code);

        self.usage.add(&code).await?;

        info!(code = %code, "voucher consumed");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::vouchers::store::MemoryVoucherUsage;

    use super::*;

    fn service() -> VoucherService {
        VoucherService::new(
            VoucherCatalog::standard(),
            Arc::new(MemoryVoucherUsage::default()),
        )
    }

    #[tokio::test]
    async fn validate_accepts_a_fresh_code() -> TestResult {
        let vouchers = service();

        let validated = vouchers.validate("SHEAR20A").await?;

        assert_eq!(validated.code, "SHEAR20A");
        assert_eq!(validated.discount_percent, 20);

        Ok(())
    }

    #[tokio::test]
    async fn validate_normalises_case_and_whitespace() -> TestResult {
        let vouchers = service();

        let validated = vouchers.validate(" shear20a ").await?;

        assert_eq!(validated.code, "SHEAR20A");

        Ok(())
    }

    #[tokio::test]
    async fn validate_rejects_unknown_codes() {
        let vouchers = service();

        let result = vouchers.validate("SHEAR99Z").await;

        assert!(
            matches!(
                result,
                Err(VouchersServiceError::Voucher(VoucherError::NotFound))
            ),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn validate_rejects_a_used_code() -> TestResult {
        let vouchers = service();

        vouchers.validate("SHEAR20A").await?;
        vouchers.mark_used("SHEAR20A").await?;

        let result = vouchers.validate("SHEAR20A").await;

        assert!(
            matches!(
                result,
                Err(VouchersServiceError::Voucher(VoucherError::AlreadyUsed))
            ),
            "expected AlreadyUsed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn mark_used_normalises_before_storing() -> TestResult {
        let vouchers = service();

        vouchers.mark_used(" shear20b ").await?;

        let result = vouchers.validate("SHEAR20B").await;

        assert!(
            matches!(
                result,
                Err(VouchersServiceError::Voucher(VoucherError::AlreadyUsed))
            ),
            "expected AlreadyUsed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn other_codes_stay_valid_after_one_is_used() -> TestResult {
        let vouchers = service();

        vouchers.mark_used("SHEAR20A").await?;

        let validated = vouchers.validate("SHEAR20B").await?;

        assert_eq!(validated.code, "SHEAR20B");

        Ok(())
    }
}
