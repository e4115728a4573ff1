//! One-way password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{UserError, UserResult};

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHashing: Send + Sync {
    /// Hash `raw` with a fresh random salt.
    fn hash(&self, raw: &str) -> UserResult<String>;

    fn verify(&self, raw: &str, hash: &str) -> UserResult<bool>;
}

/// Argon2id with the crate's default parameters, PHC string output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Hasher;

impl PasswordHashing for Argon2Hasher {
    fn hash(&self, raw: &str) -> UserResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(raw.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UserError::PasswordHash(e.to_string()))
    }

    fn verify(&self, raw: &str, hash: &str) -> UserResult<bool> {
        let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("correct horse").unwrap();

        assert_ne!(hash, "correct horse");
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_salts_differ() {
        let hasher = Argon2Hasher;
        assert_ne!(
            hasher.hash("correct horse").unwrap(),
            hasher.hash("correct horse").unwrap()
        );
    }

    #[test]
    fn test_verify() {
        let hasher = Argon2Hasher;
        let hash = hasher.hash("correct horse").unwrap();

        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_hash() {
        assert!(matches!(
            Argon2Hasher.verify("correct horse", "not-a-phc-string"),
            Err(UserError::PasswordHash(_))
        ));
    }
}
