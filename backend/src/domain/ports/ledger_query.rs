//! Driving port for user-facing ledger reads.

use async_trait::async_trait;

use crate::domain::deposit::Deposit;
use crate::domain::error::Error;
use crate::domain::redemption::RedemptionRequest;
use crate::domain::user::{User, UserId};

/// Use-case port for reading a user's own ledger state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LedgerQuery: Send + Sync {
    /// Fetch the user's profile, including the current points balance.
    async fn profile(&self, user_id: UserId) -> Result<User, Error>;

    /// Fetch the user's current points balance.
    async fn balance(&self, user_id: UserId) -> Result<i64, Error>;

    /// List the user's deposits, newest first.
    async fn deposits_for(&self, user_id: UserId) -> Result<Vec<Deposit>, Error>;

    /// List the user's redemption requests, newest first.
    async fn redemptions_for(&self, user_id: UserId) -> Result<Vec<RedemptionRequest>, Error>;
}
