//! Handler for the `jwks` subcommand.

use anyhow::{Context, Result};

use jwt_mock::KeyStore;

use crate::cli::JwksArgs;

/// Generate a key and print its public key set as pretty JSON.
pub fn execute(args: &JwksArgs) -> Result<()> {
    let key_store = KeyStore::initialize(&args.key.options())?;
    let json = serde_json::to_string_pretty(&key_store.public_key_set())
        .context("failed to serialize key set")?;
    println!("{json}");
    Ok(())
}
