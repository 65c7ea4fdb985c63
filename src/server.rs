//! # HTTP Server
//!
//! HTTP front door for the gateway.
//!
//! Provides endpoints:
//! - `GET /api/v1/data/{id}` - fetch a secret value from the backend store
//! - `POST /api/v1/data/{id}` - store a secret value in the backend store
//! - `/healthz` - liveness probe (always returns 200)
//! - `/readyz` - readiness probe (returns 200 once the gateway is serving)
//! - `/metrics` - Prometheus metrics in text format
//!
//! Handlers delegate to the injected `SecretStore` and map its errors onto
//! HTTP status codes. Every failure stays scoped to the request that caused
//! it; a bad request or an unreachable backend never takes the process down.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::observability::metrics;
use crate::provider::{SecretStore, StoreError};

pub struct ServerState {
    pub store: Arc<dyn SecretStore>,
    pub is_ready: AtomicBool,
}

impl ServerState {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self {
            store,
            is_ready: AtomicBool::new(false),
        }
    }
}

/// Inbound body for `POST /api/v1/data/{id}`
#[derive(Debug, Deserialize)]
struct SetSecretRequest {
    value: String,
}

/// Request-scoped failure surfaced to the caller as an HTTP error response
#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
    BadGateway(String),
    GatewayTimeout(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::Timeout => ApiError::GatewayTimeout(message),
            StoreError::Backend { .. }
            | StoreError::Request(_)
            | StoreError::MalformedResponse(_) => ApiError::BadGateway(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::BadGateway(message) => (StatusCode::BAD_GATEWAY, message),
            ApiError::GatewayTimeout(message) => (StatusCode::GATEWAY_TIMEOUT, message),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the gateway router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(
            "/api/v1/data/{id}",
            get(get_data_handler).post(set_data_handler),
        )
        .route("/healthz", get(healthz_handler))
        .route("/readyz", get(readyz_handler))
        .route("/metrics", get(metrics_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Bind the listen address and serve until shutdown
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn start_server(address: &str, state: Arc<ServerState>) -> Result<(), anyhow::Error> {
    let app = router(Arc::clone(&state));
    let listener = TcpListener::bind(address).await?;

    info!("HTTP server listening on {}", listener.local_addr()?);
    state.is_ready.store(true, Ordering::Relaxed);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn get_data_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    match state.store.get_secret(&id).await {
        Ok(Some(value)) => {
            metrics::record_request("get", "success");
            Ok(value.into_response())
        }
        Ok(None) => {
            metrics::record_request("get", "not_found");
            Err(ApiError::NotFound(format!("secret {id} not found")))
        }
        Err(err) => {
            metrics::record_request("get", "error");
            warn!("failed to get secret {}: {}", id, err);
            Err(err.into())
        }
    }
}

async fn set_data_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    body: Result<Json<SetSecretRequest>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        metrics::record_request("set", "bad_request");
        warn!("rejected set request for {}: {}", id, rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;

    match state.store.set_secret(&id, &request.value).await {
        Ok(()) => {
            metrics::record_request("set", "success");
            Ok(StatusCode::OK)
        }
        Err(err) => {
            metrics::record_request("set", "error");
            warn!("failed to set secret {}: {}", id, err);
            Err(err.into())
        }
    }
}

async fn healthz_handler() -> impl IntoResponse {
    StatusCode::OK
}

async fn readyz_handler(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    if state.is_ready.load(Ordering::Relaxed) {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = metrics::gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain")],
            format!("Failed to encode metrics: {}", e).into_bytes(),
        );
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        buffer,
    )
}
