//! Core key management and token signing.
//!
//! This module contains the domain logic separated from the HTTP and CLI
//! layers. All types and functions here are testable without either.

pub mod claims;
mod finite;
pub mod jwks;
pub mod key_store;
pub mod keys;
pub mod token;

pub use claims::{Claims, ClaimsPolicy, parse_claims};
pub use key_store::KeyStore;
pub use keys::{KeyOptions, KeyPair, PublicKeyParams, SigningAlgorithm};
pub use token::TokenBuilder;
