//! # Secret Store Providers
//!
//! Backend secret stores consumed by the gateway.
//!
//! Each store implements the `SecretStore` trait. The single production
//! implementation is `VaultKv2`, a REST client for Vault's KV v2 secrets
//! engine.

use async_trait::async_trait;
use thiserror::Error;

pub mod vault;

pub use vault::VaultKv2;

/// Failure of a single backend operation.
///
/// Every variant is scoped to the request that triggered the operation;
/// nothing here is retried or treated as fatal to the process.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend rejected the operation or answered with a failure status.
    #[error("backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    /// Outbound call exceeded the fixed request timeout.
    #[error("timed out contacting backend")]
    Timeout,

    /// Transport-level failure reaching the backend.
    #[error("error contacting backend: {0}")]
    Request(reqwest::Error),

    /// Backend answered 2xx but the body did not match the expected envelope.
    #[error("malformed backend response: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            StoreError::Timeout
        } else {
            StoreError::Request(err)
        }
    }
}

/// Store trait for versioned key-value secret backends
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Get the current value of a secret.
    /// Returns `None` if the secret does not exist in the backend.
    async fn get_secret(&self, id: &str) -> Result<Option<String>, StoreError>;

    /// Create or overwrite a secret with the given value.
    async fn set_secret(&self, id: &str, value: &str) -> Result<(), StoreError>;
}
