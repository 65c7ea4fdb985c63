//! Vault KV v2 REST Client
//!
//! Native REST implementation for Vault's KV version 2 secrets engine.
//! Uses reqwest for HTTP requests and the `X-Vault-Token` header for
//! authentication.
//!
//! The KV v2 engine wraps secret data in a nested envelope: writes carry the
//! stored fields under `data`, reads return them one level deeper under
//! `data.data`. This client owns that translation so callers only ever see
//! plain string values.
//!
//! References:
//! - [Vault KV v2 HTTP API](https://developer.hashicorp.com/vault/api-docs/secret/kv/kv-v2)

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::constants::{VAULT_KV_MOUNT, VAULT_REQUEST_TIMEOUT_SECS, VAULT_TOKEN_HEADER};
use crate::observability::metrics;
use crate::provider::{SecretStore, StoreError};

/// Vault KV v2 REST client
pub struct VaultKv2 {
    http_client: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for VaultKv2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultKv2")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Vault KV v2 Request/Response Structures
// ============================================================================

/// Request body for writing a secret
///
/// The KV v2 engine expects the stored fields wrapped in a `data` object:
/// `{"data": {"value": ...}}`. Serialized with serde so hostile values
/// (quotes, backslashes, control characters) are escaped correctly.
#[derive(Debug, Serialize)]
struct KvWriteRequest<'a> {
    data: KvValue<'a>,
}

/// The single field stored per secret
#[derive(Debug, Serialize)]
struct KvValue<'a> {
    value: &'a str,
}

/// Response body for reading a secret
///
/// Reads come back nested one level deeper than writes:
/// `{"data": {"data": {"value": ...}, "metadata": {...}}, "errors": []}`.
/// All layers are optional so a partial body surfaces as a malformed-response
/// error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
struct KvReadResponse {
    #[serde(default)]
    data: Option<KvReadData>,
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct KvReadData {
    #[serde(default)]
    data: Option<KvReadValue>,
}

#[derive(Debug, Deserialize)]
struct KvReadValue {
    #[serde(default)]
    value: Option<String>,
}

/// Error body returned by Vault on failure statuses
///
/// Vault reports failures as `{"errors": ["..."]}`; a missing secret is a
/// 404 with an empty list.
#[derive(Debug, Deserialize)]
struct VaultErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

impl VaultKv2 {
    /// Create a new Vault KV v2 client
    ///
    /// `address` may be a full base URL or a bare `host:port`, in which case
    /// `http://` is assumed. All requests share one HTTP client with a fixed
    /// total timeout; no retries.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be initialized.
    pub fn new(address: &str, token: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(VAULT_REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(address),
            token: token.to_owned(),
        })
    }

    /// Build the backend URL for a secret id
    ///
    /// The id is percent-encoded so path-hostile characters cannot change the
    /// request target.
    fn secret_url(&self, id: &str) -> String {
        format!(
            "{}/v1/{}/data/{}",
            self.base_url,
            VAULT_KV_MOUNT,
            urlencoding::encode(id)
        )
    }
}

#[async_trait]
impl SecretStore for VaultKv2 {
    async fn get_secret(&self, id: &str) -> Result<Option<String>, StoreError> {
        let start = Instant::now();

        let response = self
            .http_client
            .get(self.secret_url(id))
            .header(VAULT_TOKEN_HEADER, &self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("secret {} not found in backend", id);
            metrics::record_backend_operation("get", start.elapsed().as_secs_f64());
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            metrics::increment_backend_errors("get");
            return Err(backend_error(status, &body));
        }

        let envelope: KvReadResponse = response.json().await.map_err(|err| {
            metrics::increment_backend_errors("get");
            if err.is_decode() {
                StoreError::MalformedResponse(err.to_string())
            } else {
                StoreError::from(err)
            }
        })?;

        if !envelope.errors.is_empty() {
            metrics::increment_backend_errors("get");
            return Err(StoreError::Backend {
                status: status.as_u16(),
                message: envelope.errors.join(", "),
            });
        }

        let value = envelope
            .data
            .and_then(|outer| outer.data)
            .and_then(|inner| inner.value)
            .ok_or_else(|| {
                metrics::increment_backend_errors("get");
                StoreError::MalformedResponse("response is missing data.data.value".to_owned())
            })?;

        metrics::record_backend_operation("get", start.elapsed().as_secs_f64());
        Ok(Some(value))
    }

    async fn set_secret(&self, id: &str, value: &str) -> Result<(), StoreError> {
        let start = Instant::now();

        let response = self
            .http_client
            .post(self.secret_url(id))
            .header(VAULT_TOKEN_HEADER, &self.token)
            .json(&KvWriteRequest {
                data: KvValue { value },
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            metrics::increment_backend_errors("set");
            return Err(backend_error(status, &body));
        }

        metrics::record_backend_operation("set", start.elapsed().as_secs_f64());
        Ok(())
    }
}

/// Turn a failure status and body into a `StoreError`
///
/// Prefers the error strings from Vault's `{"errors": [...]}` body; falls
/// back to the raw body, then to the status line when the body is empty.
fn backend_error(status: StatusCode, body: &str) -> StoreError {
    let message = match serde_json::from_str::<VaultErrorResponse>(body) {
        Ok(parsed) if !parsed.errors.is_empty() => parsed.errors.join(", "),
        _ if body.trim().is_empty() => status.to_string(),
        _ => body.trim().to_owned(),
    };

    StoreError::Backend {
        status: status.as_u16(),
        message,
    }
}

/// Normalize a configured Vault address into a base URL
///
/// Accepts `host:port` (scheme defaults to `http://`) and strips any
/// trailing slash so path concatenation stays predictable.
fn normalize_base_url(address: &str) -> String {
    let trimmed = address.trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("http://{trimmed}")
    }
}
