//! PostgreSQL-backed `UserRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    InsertUserOutcome, StoredCredentials, UserRepository, UserRepositoryError,
};
use crate::domain::user::{
    DisplayName, EmailAddress, PhoneNumber, Role, User, UserDraft, UserId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, |message| UserRepositoryError::connection(message))
}

fn map_diesel(error: DieselError) -> UserRepositoryError {
    map_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain user.
pub(super) fn row_to_user(row: &UserRow) -> Result<User, UserRepositoryError> {
    let role = row
        .role
        .parse::<Role>()
        .map_err(|err| UserRepositoryError::query(format!("decode role: {err}")))?;
    User::new(UserDraft {
        id: UserId::from_uuid(row.id),
        name: DisplayName::new(row.name.clone())
            .map_err(|err| UserRepositoryError::query(format!("decode name: {err}")))?,
        email: EmailAddress::new(row.email.clone())
            .map_err(|err| UserRepositoryError::query(format!("decode email: {err}")))?,
        phone: PhoneNumber::new(row.phone.clone())
            .map_err(|err| UserRepositoryError::query(format!("decode phone: {err}")))?,
        role,
        points: row.points,
        created_at: row.created_at,
    })
    .map_err(|err| UserRepositoryError::query(err.to_string()))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &str,
    ) -> Result<InsertUserOutcome, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            name: user.name().as_ref(),
            email: user.email().as_ref(),
            phone: user.phone().as_ref(),
            password_hash,
            points: user.points(),
            role: user.role().as_str(),
            created_at: user.created_at(),
        };

        match diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
        {
            Ok(_) => Ok(InsertUserOutcome::Inserted),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                Ok(InsertUserOutcome::DuplicateEmail)
            }
            Err(err) => Err(map_diesel(err)),
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(|row| {
            Ok(StoredCredentials {
                user: row_to_user(&row)?,
                password_hash: row.password_hash,
            })
        })
        .transpose()
    }
}
