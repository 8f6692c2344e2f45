//! Products service errors.

use thiserror::Error;

use crate::hosted::BackendError;

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("product already exists")]
    AlreadyExists,

    #[error("product not found")]
    NotFound,

    #[error("storage error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for ProductsServiceError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NotFound => Self::NotFound,
            BackendError::Conflict => Self::AlreadyExists,
            other => Self::Backend(other),
        }
    }
}
