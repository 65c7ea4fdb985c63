//! # Metrics
//!
//! Prometheus metrics for monitoring the gateway.
//!
//! ## Metrics Exposed
//!
//! - `vault_gateway_requests_total` - Total number of data API requests by method and outcome
//! - `vault_gateway_backend_operations_total` - Total number of backend secret operations
//! - `vault_gateway_backend_operation_duration_seconds` - Duration of backend secret operations
//! - `vault_gateway_backend_errors_total` - Total number of failed backend operations

use anyhow::Result;
use prometheus::{HistogramVec, IntCounterVec, Registry};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "vault_gateway_requests_total",
            "Total number of data API requests",
        ),
        &["method", "outcome"],
    )
    .expect("Failed to create REQUESTS_TOTAL metric - this should never happen")
});

static BACKEND_OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "vault_gateway_backend_operations_total",
            "Total number of backend secret operations",
        ),
        &["operation"],
    )
    .expect("Failed to create BACKEND_OPERATIONS_TOTAL metric - this should never happen")
});

static BACKEND_OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "vault_gateway_backend_operation_duration_seconds",
            "Duration of backend secret operations in seconds",
        )
        .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 5.0, 10.0]),
        &["operation"],
    )
    .expect("Failed to create BACKEND_OPERATION_DURATION metric - this should never happen")
});

static BACKEND_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "vault_gateway_backend_errors_total",
            "Total number of failed backend operations",
        ),
        &["operation"],
    )
    .expect("Failed to create BACKEND_ERRORS_TOTAL metric - this should never happen")
});

/// Register all metrics with the registry
///
/// # Errors
/// Returns an error if a metric is registered twice.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(BACKEND_OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(BACKEND_OPERATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(BACKEND_ERRORS_TOTAL.clone()))?;

    Ok(())
}

/// Record the outcome of one data API request
pub fn record_request(method: &str, outcome: &str) {
    REQUESTS_TOTAL.with_label_values(&[method, outcome]).inc();
}

/// Record a completed backend operation and its duration
pub fn record_backend_operation(operation: &str, duration: f64) {
    BACKEND_OPERATIONS_TOTAL
        .with_label_values(&[operation])
        .inc();
    BACKEND_OPERATION_DURATION
        .with_label_values(&[operation])
        .observe(duration);
}

/// Count a failed backend operation
pub fn increment_backend_errors(operation: &str) {
    BACKEND_ERRORS_TOTAL.with_label_values(&[operation]).inc();
}

/// Gather the current state of all registered metrics
pub fn gather() -> Vec<prometheus::proto::MetricFamily> {
    REGISTRY.gather()
}
