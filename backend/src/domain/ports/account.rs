//! Driving port for registration and login.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{DisplayName, EmailAddress, PhoneNumber, User};

/// Parameters for creating an account.
#[derive(Debug, Clone)]
pub struct RegisterAccountRequest {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub password: String,
}

/// Parameters for authenticating.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: EmailAddress,
    pub password: String,
}

/// Use-case port for account lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create a new account with a hashed credential and a zero balance.
    async fn register(&self, request: RegisterAccountRequest) -> Result<User, Error>;

    /// Authenticate credentials and return the account.
    async fn login(&self, request: LoginRequest) -> Result<User, Error>;
}
