//! Argon2id adapter for the credential hashing port.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    Error as HashError, PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};

use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Argon2id hasher with the library's recommended defaults.
#[derive(Debug, Default, Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Create a hasher with default Argon2id parameters.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(PasswordHasherError::hashing)
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHasherError> {
        let parsed = PasswordHash::new(stored_hash).map_err(PasswordHasherError::hashing)?;
        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(err) => Err(PasswordHasherError::hashing(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn hash_round_trips() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("correct horse battery").expect("hashes");

        assert!(hash.starts_with("$argon2id$"));
        assert!(
            hasher
                .verify("correct horse battery", &hash)
                .expect("verifies")
        );
        assert!(!hasher.verify("wrong password", &hash).expect("verifies"));
    }

    #[rstest]
    fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("same input").expect("hashes");
        let second = hasher.hash("same input").expect("hashes");
        assert_ne!(first, second);
    }

    #[rstest]
    fn malformed_stored_hash_is_an_error() {
        let hasher = Argon2PasswordHasher::new();
        let error = hasher
            .verify("anything", "not-a-phc-string")
            .expect_err("malformed hash");
        assert!(matches!(error, PasswordHasherError::Hashing { .. }));
    }
}
