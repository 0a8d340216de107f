//! Port for credential hashing.
//!
//! Passwords are hashed before they reach any repository; the plaintext
//! comparison of the system this replaces is deliberately not reproduced.

use super::define_port_error;

define_port_error! {
    /// Failures raised by password hasher adapters.
    pub enum PasswordHasherError {
        /// Hashing or verification could not run.
        Hashing => "credential hashing failed: {message}",
    }
}

/// Port for hashing and verifying login credentials.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password into a self-describing PHC string.
    fn hash(&self, password: &str) -> Result<String, PasswordHasherError>;

    /// Verify a plaintext password against a stored PHC string.
    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHasherError>;
}
