//! Hosted record-store client.
//!
//! The backend is a hosted table service: flat JSON records addressed by
//! table name and UUID, with optional server-side ordering on list calls.

use reqwest::{Client, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use uuid::Uuid;

/// Configuration for connecting to the hosted table backend.
#[derive(Debug, Clone)]
pub struct HostedConfig {
    /// Backend base address, e.g. `"https://tables.example.com"`.
    pub base_url: String,

    /// API key sent as a bearer token.
    pub api_key: String,
}

/// Errors that can occur when communicating with the hosted backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The addressed record does not exist.
    #[error("record not found")]
    NotFound,

    /// The write conflicts with an existing record.
    #[error("record already exists")]
    Conflict,

    /// The backend returned a non-2xx response or unexpected body.
    #[error("unexpected response from backend: {0}")]
    UnexpectedResponse(String),
}

/// JSON-over-HTTP client for the hosted table backend.
#[derive(Debug, Clone)]
pub struct HostedTables {
    config: HostedConfig,
    http: Client,
}

impl HostedTables {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: HostedConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// List all records in a table, optionally server-ordered by a field.
    ///
    /// # Errors
    ///
    /// Returns an error on HTTP failure or an unexpected response body.
    pub async fn list<T: DeserializeOwned>(
        &self,
        table: &str,
        order_by: Option<&str>,
    ) -> Result<Vec<T>, BackendError> {
        let url = self.table_url(table);

        let mut request = self.http.get(&url).bearer_auth(&self.config.api_key);

        if let Some(field) = order_by {
            request = request.query(&[("order_by", field)]);
        }

        let response = Self::check(request.send().await?).await?;

        Ok(response.json().await?)
    }

    /// Fetch a single record by id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when the record does not exist,
    /// or an error on HTTP failure or an unexpected response body.
    pub async fn get<T: DeserializeOwned>(&self, table: &str, id: Uuid) -> Result<T, BackendError> {
        let url = self.record_url(table, id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Insert a record and return the stored representation.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Conflict`] when a record with the same id
    /// exists, or an error on HTTP failure or an unexpected response body.
    pub async fn insert<T, R>(&self, table: &str, record: &T) -> Result<R, BackendError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.table_url(table);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(record)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Apply a partial update to a record and return the stored
    /// representation.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when the record does not exist,
    /// or an error on HTTP failure or an unexpected response body.
    pub async fn update<T, R>(&self, table: &str, id: Uuid, patch: &T) -> Result<R, BackendError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.record_url(table, id);

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.config.api_key)
            .json(patch)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    /// Delete a record.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when the record does not exist,
    /// or an error on HTTP failure.
    pub async fn delete(&self, table: &str, id: Uuid) -> Result<(), BackendError> {
        let url = self.record_url(table, id);

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        Self::check(response).await?;

        Ok(())
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/tables/{table}", self.config.base_url)
    }

    fn record_url(&self, table: &str, id: Uuid) -> String {
        format!("{}/tables/{table}/{id}", self.config.base_url)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound);
        }

        if status == StatusCode::CONFLICT {
            return Err(BackendError::Conflict);
        }

        let text = response.text().await.unwrap_or_default();

        Err(BackendError::UnexpectedResponse(format!(
            "request failed with status {status}: {text}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_and_record_urls() {
        let tables = HostedTables::new(HostedConfig {
            base_url: "https://tables.example.com".to_string(),
            api_key: "key".to_string(),
        });

        let id = Uuid::from_u128(1);

        assert_eq!(
            tables.table_url("products"),
            "https://tables.example.com/tables/products"
        );
        assert_eq!(
            tables.record_url("products", id),
            format!("https://tables.example.com/tables/products/{id}")
        );
    }
}
