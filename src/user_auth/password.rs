use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString, rand_core::OsRng,
    },
};

use crate::config::Argon2Config;

#[derive(Debug, Clone, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct HashingError(String);

impl HashingError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// One-way password hashing with a fresh random salt per call (Argon2id).
///
/// Hashes are PHC strings, so verification reads the cost parameters from the
/// stored hash rather than from this hasher.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl CredentialHasher {
    pub fn new(config: &Argon2Config) -> Result<Self, HashingError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| HashingError::new(format!("invalid argon2 params: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn hash(&self, password: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| HashingError::new(e.to_string()))
    }

    /// `false` on any mismatch, including a hash that does not parse.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(password.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> CredentialHasher {
        CredentialHasher::new(&Argon2Config {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = fast_hasher();
        let hash = hasher.hash("p1").unwrap();
        assert!(hasher.verify("p1", &hash));
        assert!(!hasher.verify("p2", &hash));
    }

    #[test]
    fn test_same_password_distinct_hashes() {
        let hasher = fast_hasher();
        let a = hasher.hash("correct horse").unwrap();
        let b = hasher.hash("correct horse").unwrap();
        assert_ne!(a, b, "salts must differ between calls");
        assert!(hasher.verify("correct horse", &a));
        assert!(hasher.verify("correct horse", &b));
    }

    #[test]
    fn test_hash_is_phc_argon2id() {
        let hash = fast_hasher().hash("secret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("secret"));
    }

    #[test]
    fn test_malformed_hash_is_false_not_error() {
        let hasher = fast_hasher();
        assert!(!hasher.verify("p1", ""));
        assert!(!hasher.verify("p1", "not-a-phc-string"));
        assert!(!hasher.verify("p1", "$argon2id$v=19$garbage"));
    }

    #[test]
    fn test_verify_uses_params_from_hash() {
        // Hash with light params, verify with a default-cost hasher
        let hash = fast_hasher().hash("p1").unwrap();
        assert!(CredentialHasher::default().verify("p1", &hash));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let res = CredentialHasher::new(&Argon2Config {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(res.is_err());
    }
}
