//! Voucher usage store.
//!
//! The set of redeemed voucher codes, kept separate from the fixed catalog
//! so the persistence medium stays swappable. A code can be added at most
//! once; adding it again is a no-op.

use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::hosted::BackendError;

/// Errors from the voucher usage store.
#[derive(Debug, Error)]
pub enum VoucherUsageError {
    /// The usage file could not be read or written.
    #[error("io error")]
    Io(#[from] std::io::Error),

    /// The usage file exists but does not hold a JSON list of codes.
    #[error("corrupt usage file")]
    Corrupt(#[source] serde_json::Error),

    /// A remote usage store call failed.
    #[error("storage error")]
    Backend(#[from] BackendError),
}

/// Durable set of redeemed voucher codes.
#[automock]
#[async_trait]
pub trait VoucherUsageStore: Send + Sync {
    /// Check whether a normalised code has been redeemed.
    async fn contains(&self, code: &str) -> Result<bool, VoucherUsageError>;

    /// Record a normalised code as redeemed; idempotent.
    async fn add(&self, code: &str) -> Result<(), VoucherUsageError>;
}

/// In-memory used-set; state lives only for the process lifetime.
#[derive(Debug, Default)]
pub struct MemoryVoucherUsage {
    codes: Mutex<BTreeSet<String>>,
}

#[async_trait]
impl VoucherUsageStore for MemoryVoucherUsage {
    async fn contains(&self, code: &str) -> Result<bool, VoucherUsageError> {
        Ok(self.codes.lock().await.contains(code))
    }

    async fn add(&self, code: &str) -> Result<(), VoucherUsageError> {
        self.codes.lock().await.insert(code.to_string());

        Ok(())
    }
}

/// Used-set persisted as a JSON array of codes in a local file.
///
/// Durable across sessions of a single terminal; the file is rewritten in
/// full on every addition, which is fine for a code batch this small.
#[derive(Debug)]
pub struct FileVoucherUsage {
    path: PathBuf,
    codes: Mutex<BTreeSet<String>>,
}

impl FileVoucherUsage {
    /// Open the store at `path`, starting empty when no file exists yet.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, VoucherUsageError> {
        let path = path.into();
        let codes = Self::load(&path)?;

        Ok(Self {
            path,
            codes: Mutex::new(codes),
        })
    }

    fn load(path: &Path) -> Result<BTreeSet<String>, VoucherUsageError> {
        if !path.exists() {
            return Ok(BTreeSet::new());
        }

        let contents = fs::read_to_string(path)?;

        serde_json::from_str(&contents).map_err(VoucherUsageError::Corrupt)
    }

    fn persist(&self, codes: &BTreeSet<String>) -> Result<(), VoucherUsageError> {
        let contents = serde_json::to_string(codes).map_err(VoucherUsageError::Corrupt)?;

        fs::write(&self.path, contents)?;

        Ok(())
    }
}

#[async_trait]
impl VoucherUsageStore for FileVoucherUsage {
    async fn contains(&self, code: &str) -> Result<bool, VoucherUsageError> {
        Ok(self.codes.lock().await.contains(code))
    }

    async fn add(&self, code: &str) -> Result<(), VoucherUsageError> {
        let mut codes = self.codes.lock().await;

        if codes.insert(code.to_string()) {
            self.persist(&codes)?;
        }

        Ok(())
    }
}
