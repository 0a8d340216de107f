//! Account lifecycle: registration and login.
//!
//! Credentials are hashed through the [`PasswordHasher`] port before they
//! touch the repository; login failures are deliberately indistinguishable
//! between unknown email and wrong password.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::error::Error;
use crate::domain::ports::{
    AccountService, InsertUserOutcome, LoginRequest, PasswordHasher, PasswordHasherError,
    RegisterAccountRequest, UserRepository,
};
use crate::domain::user::{Role, User, UserDraft, UserId};

use super::accrual_service::map_user_repo_error;

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 8;

fn map_hasher_error(error: PasswordHasherError) -> Error {
    let PasswordHasherError::Hashing { message } = error;
    Error::internal(format!("credential hashing failed: {message}"))
}

/// Account service implementing the registration/login driving port.
#[derive(Clone)]
pub struct AccountServiceImpl<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<U, H> AccountServiceImpl<U, H> {
    /// Create the account service with its collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            clock,
        }
    }
}

#[async_trait::async_trait]
impl<U, H> AccountService for AccountServiceImpl<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: RegisterAccountRequest) -> Result<User, Error> {
        if request.password.chars().count() < PASSWORD_MIN {
            return Err(Error::invalid_request(format!(
                "password must be at least {PASSWORD_MIN} characters"
            )));
        }

        let password_hash = self
            .hasher
            .hash(&request.password)
            .map_err(map_hasher_error)?;

        let user = User::new(UserDraft {
            id: UserId::random(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            role: Role::User,
            points: 0,
            created_at: self.clock.utc(),
        })
        .map_err(|err| Error::internal(format!("constructed invalid user: {err}")))?;

        match self
            .users
            .insert(&user, &password_hash)
            .await
            .map_err(map_user_repo_error)?
        {
            InsertUserOutcome::Inserted => {
                tracing::info!(user_id = %user.id(), "account registered");
                Ok(user)
            }
            InsertUserOutcome::DuplicateEmail => {
                Err(Error::conflict("email address already registered"))
            }
        }
    }

    async fn login(&self, request: LoginRequest) -> Result<User, Error> {
        let Some(stored) = self
            .users
            .find_credentials_by_email(&request.email)
            .await
            .map_err(map_user_repo_error)?
        else {
            return Err(Error::unauthorized("invalid email or password"));
        };

        let verified = self
            .hasher
            .verify(&request.password, &stored.password_hash)
            .map_err(map_hasher_error)?;
        if !verified {
            return Err(Error::unauthorized("invalid email or password"));
        }

        tracing::info!(user_id = %stored.user.id(), "login succeeded");
        Ok(stored.user)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
