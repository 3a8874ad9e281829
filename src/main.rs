//! jwt-mock: a mock identity provider for tests.
//!
//! Entry point for the application. Parses CLI arguments, installs the
//! tracing subscriber, and delegates to the appropriate command handler.

#![forbid(unsafe_code)]

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Parse CLI arguments and dispatch to the appropriate command handler.
fn run() -> Result<()> {
    let cli = Cli::parse();
    jwt_mock::logging::init(cli.log_format)?;

    match &cli.command {
        Commands::Serve(args) => commands::serve::execute(args),
        Commands::Sign(args) => commands::sign::execute(args),
        Commands::Jwks(args) => commands::jwks::execute(args),
    }
}
