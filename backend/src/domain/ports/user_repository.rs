//! Port for account persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
    }
}

/// A user row together with its stored credential hash.
///
/// The hash never leaves the account service; it is not part of [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Outcome of inserting a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertUserOutcome {
    /// The account was created.
    Inserted,
    /// Another account already owns the email address.
    DuplicateEmail,
}

/// Port for writing and reading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account with its credential hash.
    async fn insert(
        &self,
        user: &User,
        password_hash: &str,
    ) -> Result<InsertUserOutcome, UserRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch an account and its credential hash by login email.
    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError>;
}
