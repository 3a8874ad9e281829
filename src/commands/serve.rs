//! Handler for the `serve` subcommand.
//!
//! Generates the signing key, then serves the signing and JWKS endpoints
//! until interrupted. Key generation failure aborts startup.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use jwt_mock::server::{self, AppState};
use jwt_mock::{KeyStore, TokenBuilder};

use crate::cli::ServeArgs;

/// Execute the `serve` subcommand with the given arguments.
pub fn execute(args: &ServeArgs) -> Result<()> {
    let options = args.key.options();
    let key_store = KeyStore::initialize(&options)
        .context("cannot start without a signing key")?;
    info!(
        kid = key_store.current_key_id(),
        alg = %options.algorithm,
        "generated signing key"
    );

    let state = Arc::new(AppState::new(key_store, TokenBuilder::new(args.claims.policy())));
    let addr = SocketAddr::new(args.host, args.port);

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime
        .block_on(server::serve(addr, state))
        .with_context(|| format!("server on {addr} failed"))
}
