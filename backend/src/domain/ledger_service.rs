//! User-facing ledger reads: profile, balance, and history.

use std::sync::Arc;

use crate::domain::deposit::Deposit;
use crate::domain::error::Error;
use crate::domain::ports::{
    DepositRepository, DepositRepositoryError, LedgerQuery, RedemptionRepository, UserRepository,
};
use crate::domain::redemption::RedemptionRequest;
use crate::domain::user::{User, UserId};

use super::accrual_service::map_user_repo_error;
use super::review_service::map_redemption_repo_error;

fn map_deposit_repo_error(error: DepositRepositoryError) -> Error {
    match error {
        DepositRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("deposit repository unavailable: {message}"))
        }
        DepositRepositoryError::Query { message } => {
            Error::internal(format!("deposit repository error: {message}"))
        }
    }
}

/// Read-side service implementing the ledger query driving port.
#[derive(Clone)]
pub struct LedgerQueryService<U, D, R> {
    users: Arc<U>,
    deposits: Arc<D>,
    redemptions: Arc<R>,
}

impl<U, D, R> LedgerQueryService<U, D, R> {
    /// Create the query service with its repositories.
    pub fn new(users: Arc<U>, deposits: Arc<D>, redemptions: Arc<R>) -> Self {
        Self {
            users,
            deposits,
            redemptions,
        }
    }
}

#[async_trait::async_trait]
impl<U, D, R> LedgerQuery for LedgerQueryService<U, D, R>
where
    U: UserRepository,
    D: DepositRepository,
    R: RedemptionRepository,
{
    async fn profile(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_repo_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    async fn balance(&self, user_id: UserId) -> Result<i64, Error> {
        Ok(self.profile(user_id).await?.points())
    }

    async fn deposits_for(&self, user_id: UserId) -> Result<Vec<Deposit>, Error> {
        self.deposits
            .list_for_user(user_id)
            .await
            .map_err(map_deposit_repo_error)
    }

    async fn redemptions_for(&self, user_id: UserId) -> Result<Vec<RedemptionRequest>, Error> {
        self.redemptions
            .list_for_user(user_id)
            .await
            .map_err(map_redemption_repo_error)
    }
}
