//! CLI argument definitions for jwt-mock.
//!
//! Uses `clap` derive macros to define the command-line interface.
//! Each subcommand has its own argument struct for type-safe parsing;
//! key and claims options are shared through flattened groups. Every
//! option also reads from a `JWT_MOCK_*` environment variable.

use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand, ValueEnum};

use jwt_mock::core::keys::DEFAULT_RSA_BITS;
use jwt_mock::logging::LogFormat;
use jwt_mock::{ClaimsPolicy, KeyOptions, SigningAlgorithm};

/// A mock identity provider that issues signed JWTs for testing and
/// publishes the matching JSON Web Key Set.
#[derive(Debug, Parser)]
#[command(name = "jwt-mock")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log output format.
    #[arg(long, global = true, value_name = "FORMAT", default_value_t = LogFormat::Text, env = "JWT_MOCK_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the signing and JWKS endpoints over HTTP.
    Serve(ServeArgs),

    /// Sign a single token and print it.
    Sign(SignArgs),

    /// Generate a key and print its public JSON Web Key Set.
    Jwks(JwksArgs),
}

/// Signing algorithm choices on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    /// RSA PKCS#1 v1.5 with SHA-256.
    Rs256,
    /// ECDSA P-256 with SHA-256.
    Es256,
}

impl From<AlgorithmArg> for SigningAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Rs256 => SigningAlgorithm::Rs256,
            AlgorithmArg::Es256 => SigningAlgorithm::Es256,
        }
    }
}

/// Options controlling the generated signing key.
#[derive(Debug, Args)]
pub struct KeyArgs {
    /// Algorithm of the generated signing key.
    #[arg(long, value_enum, default_value_t = AlgorithmArg::Rs256, env = "JWT_MOCK_ALGORITHM")]
    pub algorithm: AlgorithmArg,

    /// RSA modulus size in bits (RS256 only, minimum 2048).
    #[arg(long, value_name = "BITS", default_value_t = DEFAULT_RSA_BITS, env = "JWT_MOCK_RSA_BITS")]
    pub rsa_bits: usize,
}

impl KeyArgs {
    /// Convert to the core key options.
    pub fn options(&self) -> KeyOptions {
        KeyOptions {
            algorithm: self.algorithm.into(),
            rsa_bits: self.rsa_bits,
        }
    }
}

/// Options controlling injected timing claims.
#[derive(Debug, Args)]
pub struct ClaimsArgs {
    /// Keep the caller's `iat` instead of setting it to the signing time.
    #[arg(long, env = "JWT_MOCK_NO_ISSUED_AT", value_parser = BoolishValueParser::new())]
    pub no_issued_at: bool,

    /// Set `exp` to the signing time plus this many seconds.
    #[arg(long, value_name = "SECONDS", env = "JWT_MOCK_EXPIRES_IN")]
    pub expires_in: Option<u64>,

    /// Set `nbf` to the signing time.
    #[arg(long, env = "JWT_MOCK_NOT_BEFORE", value_parser = BoolishValueParser::new())]
    pub not_before: bool,
}

impl ClaimsArgs {
    /// Convert to the core claims policy.
    pub fn policy(&self) -> ClaimsPolicy {
        ClaimsPolicy {
            issued_at: !self.no_issued_at,
            expires_in: self.expires_in.map(Duration::from_secs),
            not_before: self.not_before,
        }
    }
}

/// Arguments for the `serve` subcommand.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1", env = "JWT_MOCK_HOST")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, short, default_value_t = 8080, env = "JWT_MOCK_PORT")]
    pub port: u16,

    #[command(flatten)]
    pub key: KeyArgs,

    #[command(flatten)]
    pub claims: ClaimsArgs,
}

/// Arguments for the `sign` subcommand.
#[derive(Args)]
pub struct SignArgs {
    /// The claims as a JSON object. If omitted, reads from stdin.
    pub claims_json: Option<String>,

    /// Read the claims from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub claims_env: Option<String>,

    /// Print a JSON object holding the token and the key set that verifies it.
    #[arg(long)]
    pub with_jwks: bool,

    #[command(flatten)]
    pub key: KeyArgs,

    #[command(flatten)]
    pub claims: ClaimsArgs,
}

/// Custom `Debug` that redacts the claims, which may carry test identities.
impl fmt::Debug for SignArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignArgs")
            .field("claims_json", &self.claims_json.as_ref().map(|_| "[REDACTED]"))
            .field("claims_env", &self.claims_env)
            .field("with_jwks", &self.with_jwks)
            .field("key", &self.key)
            .field("claims", &self.claims)
            .finish()
    }
}

/// Arguments for the `jwks` subcommand.
#[derive(Debug, Args)]
pub struct JwksArgs {
    #[command(flatten)]
    pub key: KeyArgs,
}
