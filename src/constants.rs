//! # Constants
//!
//! Shared constants used throughout the gateway.
//!
//! These values represent reasonable defaults and can be overridden via
//! CLI flags where applicable.

/// Default listen address for the gateway's HTTP server
pub const DEFAULT_LISTEN_ADDRESS: &str = "127.0.0.1:8899";

/// Default base address of the Vault server
pub const DEFAULT_VAULT_ADDRESS: &str = "127.0.0.1:8200";

/// Total timeout for a single outbound Vault request (seconds)
pub const VAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Header carrying the Vault authentication token
pub const VAULT_TOKEN_HEADER: &str = "X-Vault-Token";

/// Mount path of the KV v2 secrets engine consumed by the gateway
pub const VAULT_KV_MOUNT: &str = "secret";
