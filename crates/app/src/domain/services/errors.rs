//! Salon services errors.

use thiserror::Error;

use crate::hosted::BackendError;

#[derive(Debug, Error)]
pub enum ServicesServiceError {
    #[error("service already exists")]
    AlreadyExists,

    #[error("service not found")]
    NotFound,

    #[error("storage error")]
    Backend(#[source] BackendError),
}

impl From<BackendError> for ServicesServiceError {
    fn from(error: BackendError) -> Self {
        match error {
            BackendError::NotFound => Self::NotFound,
            BackendError::Conflict => Self::AlreadyExists,
            other => Self::Backend(other),
        }
    }
}
