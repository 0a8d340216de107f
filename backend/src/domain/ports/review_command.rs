//! Driving port for admin review of deposits and redemptions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::deposit::Deposit;
use crate::domain::error::Error;
use crate::domain::redemption::RedemptionRequest;
use crate::domain::user::UserId;

/// Parameters for a forward transition (approve / complete).
#[derive(Debug, Clone)]
pub struct ApproveAction {
    pub record_id: Uuid,
    pub admin_id: UserId,
    pub notes: Option<String>,
}

/// Parameters for a reversal transition (reject / fail); the reason is
/// mandatory and stored as the review notes.
#[derive(Debug, Clone)]
pub struct RejectAction {
    pub record_id: Uuid,
    pub admin_id: UserId,
    pub reason: String,
}

/// Use-case port for the review workflows.
///
/// All methods require the acting identity to resolve to an admin account
/// and their target to still be pending; transitions from a terminal state
/// fail with a conflict and leave balances untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewCommand: Send + Sync {
    /// Approve a pending deposit, crediting its awarded points.
    async fn approve_deposit(&self, action: ApproveAction) -> Result<Deposit, Error>;

    /// Reject a pending deposit; the balance is untouched.
    async fn reject_deposit(&self, action: RejectAction) -> Result<Deposit, Error>;

    /// Mark a pending redemption as paid out.
    async fn complete_redemption(&self, action: ApproveAction)
    -> Result<RedemptionRequest, Error>;

    /// Fail a pending redemption, refunding its reserved points.
    async fn fail_redemption(&self, action: RejectAction) -> Result<RedemptionRequest, Error>;

    /// List deposits awaiting review, newest first.
    async fn list_pending_deposits(&self, admin_id: UserId) -> Result<Vec<Deposit>, Error>;

    /// List redemptions awaiting resolution, newest first.
    async fn list_pending_redemptions(
        &self,
        admin_id: UserId,
    ) -> Result<Vec<RedemptionRequest>, Error>;
}
