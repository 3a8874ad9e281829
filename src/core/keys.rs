//! Asymmetric signing key material.
//!
//! A [`KeyPair`] bundles a freshly generated private key with the public
//! parameters derived from it and a random key ID. The private half is only
//! ever held as a [`jsonwebtoken::EncodingKey`]; nothing in this module can
//! serialize it.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::jwk::KeyAlgorithm;
use jsonwebtoken::{Algorithm, EncodingKey};
use p256::SecretKey;
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::pkcs8::EncodePrivateKey;
use rand::rngs::OsRng;
use rsa::RsaPrivateKey;
use rsa::pkcs1::EncodeRsaPrivateKey;
use rsa::traits::PublicKeyParts;
use uuid::Uuid;

use crate::error::MockError;

/// Default RSA modulus size in bits.
pub const DEFAULT_RSA_BITS: usize = 2048;

/// Smallest RSA modulus accepted for RS256 keys.
pub const MIN_RSA_BITS: usize = 2048;

/// Signature algorithms a key pair can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SigningAlgorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-256.
    #[default]
    Rs256,
    /// ECDSA over P-256 with SHA-256.
    Es256,
}

impl SigningAlgorithm {
    /// The JOSE name of the algorithm (`RS256`, `ES256`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rs256 => "RS256",
            Self::Es256 => "ES256",
        }
    }

    /// The algorithm used in the token header.
    pub fn jwt_algorithm(self) -> Algorithm {
        match self {
            Self::Rs256 => Algorithm::RS256,
            Self::Es256 => Algorithm::ES256,
        }
    }

    /// The algorithm advertised in the published JWK.
    pub fn key_algorithm(self) -> KeyAlgorithm {
        match self {
            Self::Rs256 => KeyAlgorithm::RS256,
            Self::Es256 => KeyAlgorithm::ES256,
        }
    }
}

impl fmt::Display for SigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for generating a key pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOptions {
    /// Which algorithm the key signs with.
    pub algorithm: SigningAlgorithm,
    /// RSA modulus size. Ignored for EC keys.
    pub rsa_bits: usize,
}

impl Default for KeyOptions {
    fn default() -> Self {
        Self {
            algorithm: SigningAlgorithm::Rs256,
            rsa_bits: DEFAULT_RSA_BITS,
        }
    }
}

/// Public key parameters, base64url-encoded without padding as in RFC 7518.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyParams {
    /// RSA modulus and public exponent.
    Rsa {
        /// Modulus, big-endian.
        n: String,
        /// Public exponent, big-endian.
        e: String,
    },
    /// Uncompressed P-256 point coordinates.
    Ec {
        /// X coordinate.
        x: String,
        /// Y coordinate.
        y: String,
    },
}

/// A signing key pair with a stable identifier.
///
/// Immutable once generated. Shared between threads behind an `Arc` by the
/// key store.
pub struct KeyPair {
    id: String,
    algorithm: SigningAlgorithm,
    encoding_key: EncodingKey,
    public: PublicKeyParams,
}

impl KeyPair {
    /// Generate a key pair with a fresh random key ID.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::KeyGeneration`] if the key size is too small or
    /// the underlying primitive fails.
    pub fn generate(options: &KeyOptions) -> Result<Self, MockError> {
        Self::generate_with_id(options, Uuid::new_v4().to_string())
    }

    /// Generate a key pair under a caller-chosen key ID.
    ///
    /// # Errors
    ///
    /// Same as [`KeyPair::generate`].
    pub fn generate_with_id(options: &KeyOptions, id: impl Into<String>) -> Result<Self, MockError> {
        let id = id.into();
        match options.algorithm {
            SigningAlgorithm::Rs256 => generate_rsa(id, options.rsa_bits),
            SigningAlgorithm::Es256 => generate_p256(id),
        }
        .map_err(|reason| MockError::KeyGeneration {
            algorithm: options.algorithm.to_string(),
            reason,
        })
    }

    /// The key ID, carried as `kid` in token headers and the JWKS.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The algorithm this key signs with.
    pub fn algorithm(&self) -> SigningAlgorithm {
        self.algorithm
    }

    /// The public half of the key.
    pub fn public_params(&self) -> &PublicKeyParams {
        &self.public
    }

    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }
}

/// Custom `Debug` that never prints private key material.
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("id", &self.id)
            .field("algorithm", &self.algorithm)
            .field("private_key", &"[REDACTED]")
            .field("public", &self.public)
            .finish()
    }
}

fn generate_rsa(id: String, bits: usize) -> Result<KeyPair, String> {
    if bits < MIN_RSA_BITS {
        return Err(format!(
            "RSA keys must be at least {MIN_RSA_BITS} bits (got {bits})"
        ));
    }

    let private_key = RsaPrivateKey::new(&mut OsRng, bits).map_err(|e| e.to_string())?;
    let der = private_key.to_pkcs1_der().map_err(|e| e.to_string())?;

    let public = PublicKeyParams::Rsa {
        n: URL_SAFE_NO_PAD.encode(private_key.n().to_bytes_be()),
        e: URL_SAFE_NO_PAD.encode(private_key.e().to_bytes_be()),
    };

    Ok(KeyPair {
        id,
        algorithm: SigningAlgorithm::Rs256,
        encoding_key: EncodingKey::from_rsa_der(der.as_bytes()),
        public,
    })
}

fn generate_p256(id: String) -> Result<KeyPair, String> {
    let secret = SecretKey::random(&mut OsRng);
    let point = secret.public_key().to_encoded_point(false);
    let (Some(x), Some(y)) = (point.x(), point.y()) else {
        return Err("public key is the identity point".to_string());
    };
    let public = PublicKeyParams::Ec {
        x: URL_SAFE_NO_PAD.encode(x),
        y: URL_SAFE_NO_PAD.encode(y),
    };

    let der = secret.to_pkcs8_der().map_err(|e| e.to_string())?;

    Ok(KeyPair {
        id,
        algorithm: SigningAlgorithm::Es256,
        encoding_key: EncodingKey::from_ec_der(der.as_bytes()),
        public,
    })
}
