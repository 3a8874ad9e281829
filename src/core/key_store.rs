//! The key store: single source of truth for signing and verification keys.
//!
//! A [`KeyStore`] only exists once it holds at least one key, so there is no
//! uninitialized state to guard against at runtime. Keys are never mutated
//! after construction, which makes the store safe to share across request
//! handlers behind an `Arc` without locking.

use std::collections::HashSet;
use std::sync::Arc;

use jsonwebtoken::jwk::JwkSet;

use crate::core::jwks;
use crate::core::keys::{KeyOptions, KeyPair};
use crate::error::MockError;

/// Owns the signing key pairs and designates the current one.
#[derive(Debug)]
pub struct KeyStore {
    keys: Vec<Arc<KeyPair>>,
    current: usize,
}

impl KeyStore {
    /// Generate a single key pair and make it the current signing key.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::KeyGeneration`] if the key cannot be generated.
    /// Callers should treat this as fatal.
    pub fn initialize(options: &KeyOptions) -> Result<Self, MockError> {
        let key = KeyPair::generate(options)?;
        Ok(Self {
            keys: vec![Arc::new(key)],
            current: 0,
        })
    }

    /// Build a store from existing key pairs.
    ///
    /// # Errors
    ///
    /// Returns [`MockError::InvalidKeyStore`] if `keys` is empty, contains
    /// duplicate key IDs, or has no key with `current_id`.
    pub fn from_keys(keys: Vec<KeyPair>, current_id: &str) -> Result<Self, MockError> {
        if keys.is_empty() {
            return Err(MockError::InvalidKeyStore {
                reason: "a key store needs at least one key".to_string(),
            });
        }

        if let Some(dup) = first_duplicate_id(&keys) {
            return Err(MockError::InvalidKeyStore {
                reason: format!("duplicate key id '{dup}'"),
            });
        }

        let current = keys
            .iter()
            .position(|k| k.id() == current_id)
            .ok_or_else(|| MockError::InvalidKeyStore {
                reason: format!("current key id '{current_id}' does not match any key"),
            })?;

        Ok(Self {
            keys: keys.into_iter().map(Arc::new).collect(),
            current,
        })
    }

    /// The key pair that signs new tokens.
    pub fn signing_key(&self) -> Arc<KeyPair> {
        Arc::clone(&self.keys[self.current])
    }

    /// ID of the current signing key.
    pub fn current_key_id(&self) -> &str {
        self.keys[self.current].id()
    }

    /// All key pairs, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &KeyPair> {
        self.keys.iter().map(|k| &**k)
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false; a store is never empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Public keys of every key pair, recomputed on each call.
    pub fn public_key_set(&self) -> JwkSet {
        jwks::project(self.keys())
    }
}

fn first_duplicate_id(keys: &[KeyPair]) -> Option<String> {
    let mut seen = HashSet::new();
    keys.iter()
        .find(|k| !seen.insert(k.id()))
        .map(|k| k.id().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::keys::SigningAlgorithm;

    fn es256() -> KeyOptions {
        KeyOptions {
            algorithm: SigningAlgorithm::Es256,
            ..KeyOptions::default()
        }
    }

    fn key(id: &str) -> KeyPair {
        KeyPair::generate_with_id(&es256(), id).unwrap()
    }

    #[test]
    fn test_initialize_holds_exactly_one_current_key() {
        let store = KeyStore::initialize(&es256()).unwrap();
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
        assert_eq!(store.signing_key().id(), store.current_key_id());
    }

    #[test]
    fn test_initialize_propagates_key_generation_error() {
        let options = KeyOptions {
            algorithm: SigningAlgorithm::Rs256,
            rsa_bits: 512,
        };
        let err = KeyStore::initialize(&options).unwrap_err();
        assert!(matches!(err, MockError::KeyGeneration { .. }));
    }

    #[test]
    fn test_signing_key_is_shared_not_copied() {
        let store = KeyStore::initialize(&es256()).unwrap();
        assert!(Arc::ptr_eq(&store.signing_key(), &store.signing_key()));
    }

    #[test]
    fn test_from_keys_selects_current() {
        let store = KeyStore::from_keys(vec![key("a"), key("b"), key("c")], "b").unwrap();
        assert_eq!(store.signing_key().id(), "b");
        let ids: Vec<&str> = store.keys().map(KeyPair::id).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_from_keys_rejects_empty() {
        let err = KeyStore::from_keys(Vec::new(), "a").unwrap_err();
        assert!(matches!(err, MockError::InvalidKeyStore { reason } if reason.contains("at least one")));
    }

    #[test]
    fn test_from_keys_rejects_duplicate_ids() {
        let err = KeyStore::from_keys(vec![key("a"), key("a")], "a").unwrap_err();
        assert!(matches!(err, MockError::InvalidKeyStore { reason } if reason.contains("duplicate")));
    }

    #[test]
    fn test_from_keys_rejects_unknown_current() {
        let err = KeyStore::from_keys(vec![key("a")], "z").unwrap_err();
        assert!(matches!(err, MockError::InvalidKeyStore { reason } if reason.contains("'z'")));
    }

    #[test]
    fn test_public_key_set_lists_every_key() {
        let store = KeyStore::from_keys(vec![key("a"), key("b")], "a").unwrap();
        let set = store.public_key_set();
        assert_eq!(set.keys.len(), 2);
        assert!(set.find("a").is_some());
        assert!(set.find("b").is_some());
    }

    #[test]
    fn test_public_key_set_contains_signing_key() {
        let store = KeyStore::initialize(&es256()).unwrap();
        let set = store.public_key_set();
        assert!(set.find(store.signing_key().id()).is_some());
    }

    #[test]
    fn test_public_key_set_is_stable_between_reads() {
        let store = KeyStore::initialize(&es256()).unwrap();
        let first = serde_json::to_value(store.public_key_set()).unwrap();
        let second = serde_json::to_value(store.public_key_set()).unwrap();
        assert_eq!(first, second);
    }
}
