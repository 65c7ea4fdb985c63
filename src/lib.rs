//! # Vault Gateway
//!
//! A minimal HTTP gateway that exposes a simplified data API in front of
//! HashiCorp Vault's KV v2 secrets engine.
//!
//! ## Overview
//!
//! The gateway provides two data endpoints:
//!
//! 1. **`GET /api/v1/data/{id}`** - fetches a secret and returns its raw value
//! 2. **`POST /api/v1/data/{id}`** - stores a secret value from a `{"value": ...}` body
//!
//! Each inbound request is translated into a single call against Vault's
//! native `/v1/secret/data/{id}` API, wrapping and unwrapping the KV v2
//! envelope format. Failures are scoped to the originating request and
//! surfaced as HTTP error responses; the process never terminates on a bad
//! request or an unreachable backend.
//!
//! ## Features
//!
//! - **Request translation**: plain values in and out, KV v2 envelopes on the wire
//! - **Request-scoped errors**: client errors map to 4xx, backend failures to 502/504
//! - **Prometheus metrics**: request and backend-operation metrics on `/metrics`
//! - **Health probes**: HTTP endpoints for liveness and readiness checks

pub mod constants;
pub mod observability;
pub mod provider;
pub mod server;
