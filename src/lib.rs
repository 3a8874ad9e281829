//! jwt-mock: a mock identity provider for tests.
//!
//! Generates an asymmetric signing key at startup, signs arbitrary caller
//! claims into compact JWTs, and publishes the matching JSON Web Key Set so
//! relying parties can verify those tokens without a real identity provider.

#![forbid(unsafe_code)]

pub mod core;
pub mod error;
pub mod logging;
pub mod server;

pub use crate::core::{ClaimsPolicy, KeyOptions, KeyStore, SigningAlgorithm, TokenBuilder};
pub use crate::error::MockError;
