//! # Observability
//!
//! Observability modules for the gateway.
//!
//! - `metrics`: Prometheus metrics collection

pub mod metrics;
