//! Handler for the `sign` subcommand.
//!
//! Signs one token with a freshly generated key. Claims are read from the
//! CLI argument, an environment variable, or stdin, in that order. Since
//! the key is discarded on exit, `--with-jwks` prints the key set alongside
//! the token so the token can still be verified.

use std::io::{IsTerminal, Read};

use anyhow::{Context, Result};
use serde_json::json;

use jwt_mock::core::parse_claims;
use jwt_mock::{KeyStore, MockError, TokenBuilder};

use crate::cli::SignArgs;

/// Execute the `sign` subcommand with the given arguments.
pub fn execute(args: &SignArgs) -> Result<()> {
    let input = read_claims_input(args)?;
    let claims = parse_claims(input.as_bytes())?;

    let key_store = KeyStore::initialize(&args.key.options())?;
    let token = TokenBuilder::new(args.claims.policy()).sign(&claims, &key_store.signing_key())?;

    if args.with_jwks {
        let output = json!({
            "token": token,
            "jwks": key_store.public_key_set(),
        });
        let rendered = serde_json::to_string_pretty(&output).context("failed to serialize output")?;
        println!("{rendered}");
    } else {
        println!("{token}");
    }
    Ok(())
}

/// Resolve the claims JSON from the argument, environment, or stdin.
fn read_claims_input(args: &SignArgs) -> Result<String, MockError> {
    if let Some(claims) = &args.claims_json {
        return Ok(claims.clone());
    }

    if let Some(name) = &args.claims_env {
        return std::env::var(name).map_err(|_| MockError::EnvVarNotFound { name: name.clone() });
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(MockError::NoClaimsProvided);
    }

    let mut buffer = String::new();
    stdin
        .lock()
        .read_to_string(&mut buffer)
        .map_err(|e| MockError::StdinRead {
            reason: e.to_string(),
        })?;

    if buffer.trim().is_empty() {
        return Err(MockError::NoClaimsProvided);
    }
    Ok(buffer)
}
