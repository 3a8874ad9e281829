//! Domain error types for jwt-mock.
//!
//! All business-logic errors are defined here using `thiserror`.
//! They are translated into the `{message, error}` wire shape at the HTTP
//! boundary and into `anyhow` chains at the CLI boundary.

use thiserror::Error;

/// Errors that can occur while managing keys or issuing tokens.
#[derive(Debug, Error)]
pub enum MockError {
    /// The key generation primitive failed. Fatal at startup.
    #[error("failed to generate {algorithm} signing key: {reason}")]
    KeyGeneration {
        /// The algorithm the key was being generated for.
        algorithm: String,
        /// Description of the failure.
        reason: String,
    },

    /// The caller-supplied claims payload is not a JSON object.
    #[error("failed to decode claims: {reason}")]
    ClaimDecoding {
        /// Description of the decoding failure.
        reason: String,
    },

    /// The claims could not be serialized or the signature could not be computed.
    #[error("failed to sign token: {reason}")]
    Signing {
        /// Description of the signing failure.
        reason: String,
    },

    /// A key store was assembled from key pairs that break its invariants.
    #[error("invalid key store: {reason}")]
    InvalidKeyStore {
        /// Which invariant was violated.
        reason: String,
    },

    /// No claims were provided via any input method.
    #[error("no claims provided: pass a JSON object as an argument, via --claims-env, or through stdin")]
    NoClaimsProvided,

    /// Stdin was available but could not be read as UTF-8 text.
    #[error("failed to read claims from stdin: {reason}")]
    StdinRead {
        /// The underlying I/O error.
        reason: String,
    },

    /// The specified environment variable is not set.
    #[error("environment variable '{name}' is not set")]
    EnvVarNotFound {
        /// Name of the missing environment variable.
        name: String,
    },
}
