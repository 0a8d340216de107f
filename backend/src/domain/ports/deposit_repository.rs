//! Port for deposit persistence and compare-and-swap transitions.
//!
//! The transition methods are the heart of the approval state machine: each
//! must be implemented as a single atomic unit whose status write is
//! conditioned on the record still being `pending`. Two concurrent callers
//! can therefore never both observe [`DepositTransition::Applied`] for the
//! same record, and the balance credit rides in the same transaction as the
//! approval write.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::deposit::{Deposit, DepositReview, DepositStatus};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by deposit repository adapters.
    pub enum DepositRepositoryError {
        /// Repository connection could not be established.
        Connection => "deposit repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "deposit repository query failed: {message}",
    }
}

/// Outcome of a guarded deposit transition.
#[derive(Debug, Clone, PartialEq)]
pub enum DepositTransition {
    /// The caller won the compare-and-swap; the returned record reflects the
    /// new terminal state.
    Applied(Deposit),
    /// The record had already reached a terminal state; nothing changed.
    AlreadyResolved(DepositStatus),
    /// No record exists under the identifier.
    Missing,
}

/// Port for writing deposits and driving their lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepositRepository: Send + Sync {
    /// Persist a new pending deposit. The owning balance is untouched.
    async fn insert_pending(&self, deposit: &Deposit) -> Result<(), DepositRepositoryError>;

    /// Persist a new approved deposit and credit its awarded points to the
    /// owning balance, atomically. Used by the auto-approve accrual policy.
    async fn insert_approved_crediting(
        &self,
        deposit: &Deposit,
    ) -> Result<(), DepositRepositoryError>;

    /// Approve a pending deposit and credit its awarded points, atomically.
    /// The status write must be conditioned on `status = 'pending'`.
    async fn approve_crediting(
        &self,
        deposit_id: Uuid,
        review: DepositReview,
    ) -> Result<DepositTransition, DepositRepositoryError>;

    /// Reject a pending deposit. Never touches the owning balance; the
    /// status write must be conditioned on `status = 'pending'`.
    async fn reject(
        &self,
        deposit_id: Uuid,
        review: DepositReview,
    ) -> Result<DepositTransition, DepositRepositoryError>;

    /// Fetch a deposit by identifier.
    async fn find_by_id(&self, deposit_id: Uuid)
    -> Result<Option<Deposit>, DepositRepositoryError>;

    /// List a user's deposits, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Deposit>, DepositRepositoryError>;

    /// List all pending deposits, newest first.
    async fn list_pending(&self) -> Result<Vec<Deposit>, DepositRepositoryError>;
}
