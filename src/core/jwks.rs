//! JWKS (JSON Web Key Set) projection.
//!
//! Converts key pairs into the [`JwkSet`] document published to relying
//! parties. The projection holds no state; it is rebuilt from the key store
//! on every read, so it cannot drift from the authoritative key material.
//! [`Jwk`] has no fields for private parameters, so private material cannot
//! end up in the output.

use jsonwebtoken::jwk::{
    AlgorithmParameters, CommonParameters, EllipticCurve, EllipticCurveKeyParameters,
    EllipticCurveKeyType, Jwk, JwkSet, PublicKeyUse, RSAKeyParameters, RSAKeyType,
};

use crate::core::keys::{KeyPair, PublicKeyParams};

/// Project key pairs into a key set, preserving their order.
pub fn project<'a>(keys: impl IntoIterator<Item = &'a KeyPair>) -> JwkSet {
    JwkSet {
        keys: keys.into_iter().map(to_jwk).collect(),
    }
}

/// Build the public JWK for a single key pair.
pub fn to_jwk(key: &KeyPair) -> Jwk {
    let common = CommonParameters {
        public_key_use: Some(PublicKeyUse::Signature),
        key_algorithm: Some(key.algorithm().key_algorithm()),
        key_id: Some(key.id().to_string()),
        ..CommonParameters::default()
    };

    let algorithm = match key.public_params() {
        PublicKeyParams::Rsa { n, e } => AlgorithmParameters::RSA(RSAKeyParameters {
            key_type: RSAKeyType::RSA,
            n: n.clone(),
            e: e.clone(),
        }),
        PublicKeyParams::Ec { x, y } => {
            AlgorithmParameters::EllipticCurve(EllipticCurveKeyParameters {
                key_type: EllipticCurveKeyType::EC,
                curve: EllipticCurve::P256,
                x: x.clone(),
                y: y.clone(),
            })
        }
    };

    Jwk { common, algorithm }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::{KeyOptions, SigningAlgorithm};
    use serde_json::Value;

    /// Members that carry private key material in RFC 7518 JWKs.
    const PRIVATE_MEMBERS: &[&str] = &["d", "p", "q", "dp", "dq", "qi", "oth", "k"];

    fn es256_key(id: &str) -> KeyPair {
        let options = KeyOptions {
            algorithm: SigningAlgorithm::Es256,
            ..KeyOptions::default()
        };
        KeyPair::generate_with_id(&options, id).unwrap()
    }

    fn rsa_key(id: &str) -> KeyPair {
        KeyPair::generate_with_id(&KeyOptions::default(), id).unwrap()
    }

    fn assert_public_only(jwk: &Value) {
        let obj = jwk.as_object().unwrap();
        for member in PRIVATE_MEMBERS {
            assert!(!obj.contains_key(*member), "JWK exposes private member '{member}'");
        }
    }

    #[test]
    fn test_ec_jwk_shape() {
        let jwk = serde_json::to_value(to_jwk(&es256_key("ec-1"))).unwrap();
        assert_eq!(jwk["kid"], "ec-1");
        assert_eq!(jwk["kty"], "EC");
        assert_eq!(jwk["crv"], "P-256");
        assert_eq!(jwk["alg"], "ES256");
        assert_eq!(jwk["use"], "sig");
        assert!(jwk["x"].is_string());
        assert!(jwk["y"].is_string());
        assert_public_only(&jwk);
    }

    #[test]
    fn test_rsa_jwk_shape() {
        let jwk = serde_json::to_value(to_jwk(&rsa_key("rsa-1"))).unwrap();
        assert_eq!(jwk["kid"], "rsa-1");
        assert_eq!(jwk["kty"], "RSA");
        assert_eq!(jwk["alg"], "RS256");
        assert_eq!(jwk["use"], "sig");
        assert_eq!(jwk["e"], "AQAB");
        assert!(jwk["n"].is_string());
        assert_public_only(&jwk);
    }

    #[test]
    fn test_jwk_has_no_padding() {
        let jwk = serde_json::to_value(to_jwk(&rsa_key("rsa-2"))).unwrap();
        let n = jwk["n"].as_str().unwrap();
        assert!(!n.contains('='));
        assert!(!n.contains('+'));
        assert!(!n.contains('/'));
    }

    #[test]
    fn test_project_preserves_order() {
        let keys = [es256_key("first"), es256_key("second")];
        let set = project(&keys);
        let kids: Vec<_> = set
            .keys
            .iter()
            .map(|k| k.common.key_id.as_deref().unwrap())
            .collect();
        assert_eq!(kids, ["first", "second"]);
    }

    #[test]
    fn test_project_document_shape() {
        let keys = [es256_key("only")];
        let doc = serde_json::to_value(project(&keys)).unwrap();
        let listed = doc["keys"].as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_public_only(&listed[0]);
    }
}
