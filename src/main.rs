//! # Vault Gateway
//!
//! Entry point for the gateway binary.
//!
//! Parses CLI flags, initializes tracing and metrics, constructs the Vault
//! client, and serves the HTTP front door until shutdown.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use vault_gateway::constants::{DEFAULT_LISTEN_ADDRESS, DEFAULT_VAULT_ADDRESS};
use vault_gateway::observability::metrics;
use vault_gateway::provider::VaultKv2;
use vault_gateway::server::{start_server, ServerState};

/// HTTP gateway exposing a simplified data API over Vault's KV v2 secrets engine
#[derive(Parser, Debug)]
#[command(name = "vault-gateway", version, about)]
struct Cli {
    /// Address the gateway listens on
    #[arg(long, default_value = DEFAULT_LISTEN_ADDRESS)]
    address: String,

    /// Base address of the Vault server
    #[arg(long, default_value = DEFAULT_VAULT_ADDRESS)]
    vault_address: String,

    /// Token used to authenticate against Vault
    #[arg(long, default_value = "")]
    vault_token: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vault_gateway=info".into()),
        )
        .init();

    info!("Starting vault-gateway on {}", cli.address);

    metrics::register_metrics()?;

    let store = VaultKv2::new(&cli.vault_address, &cli.vault_token)
        .context("Failed to create Vault client")?;

    let state = Arc::new(ServerState::new(Arc::new(store)));

    start_server(&cli.address, state).await
}
