//! Admin review workflows: the approval state machine for deposits and the
//! resolution of redemption requests.
//!
//! Exclusivity lives in the driven ports: every transition here is backed by
//! a compare-and-swap on `status = 'pending'`, so a lost race surfaces as
//! [`DepositTransition::AlreadyResolved`] rather than a double credit.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::deposit::{Deposit, DepositReview};
use crate::domain::error::Error;
use crate::domain::ports::{
    ApproveAction, DepositRepository, DepositRepositoryError, DepositTransition, RedemptionRepository,
    RedemptionRepositoryError, RedemptionTransition, RejectAction, ReviewCommand, UserRepository,
};
use crate::domain::redemption::{RedemptionRequest, RedemptionResolution};
use crate::domain::user::{User, UserId};

use super::accrual_service::map_user_repo_error;

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

pub(crate) fn map_redemption_repo_error(error: RedemptionRepositoryError) -> Error {
    match error {
        RedemptionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("redemption repository unavailable: {message}"))
        }
        RedemptionRepositoryError::Query { message } => {
            Error::internal(format!("redemption repository error: {message}"))
        }
    }
}

/// Resolve the acting identity and require the admin role.
pub(crate) async fn require_admin<U>(users: &U, admin_id: UserId) -> Result<User, Error>
where
    U: UserRepository + ?Sized,
{
    let user = users
        .find_by_id(admin_id)
        .await
        .map_err(map_user_repo_error)?
        .ok_or_else(|| Error::forbidden("admin account required"))?;
    if !user.is_admin() {
        return Err(Error::forbidden("admin account required"));
    }
    Ok(user)
}

fn non_empty_reason(reason: &str) -> Result<String, Error> {
    let trimmed = reason.trim();
    if trimmed.is_empty() {
        return Err(Error::invalid_request("a rejection reason is required"));
    }
    Ok(trimmed.to_owned())
}

/// Review service implementing the admin driving port.
#[derive(Clone)]
pub struct ReviewService<D, R, U> {
    deposits: Arc<D>,
    redemptions: Arc<R>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<D, R, U> ReviewService<D, R, U> {
    /// Create the review service with its collaborators.
    pub fn new(deposits: Arc<D>, redemptions: Arc<R>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            deposits,
            redemptions,
            users,
            clock,
        }
    }
}

impl<D, R, U> ReviewService<D, R, U>
where
    U: UserRepository,
{
    fn deposit_review(&self, admin_id: UserId, notes: Option<String>) -> DepositReview {
        DepositReview {
            admin_id,
            notes,
            processed_at: self.clock.utc(),
        }
    }

    fn redemption_resolution(
        &self,
        admin_id: UserId,
        notes: Option<String>,
    ) -> RedemptionResolution {
        RedemptionResolution {
            admin_id,
            notes,
            processed_at: self.clock.utc(),
        }
    }
}

fn resolve_deposit_transition(transition: DepositTransition) -> Result<Deposit, Error> {
    match transition {
        DepositTransition::Applied(deposit) => Ok(deposit),
        DepositTransition::AlreadyResolved(status) => {
            Err(Error::conflict(format!("deposit already {status}")))
        }
        DepositTransition::Missing => Err(Error::not_found("deposit not found")),
    }
}

fn resolve_redemption_transition(
    transition: RedemptionTransition,
) -> Result<RedemptionRequest, Error> {
    match transition {
        RedemptionTransition::Applied(request) => Ok(request),
        RedemptionTransition::AlreadyResolved(status) => {
            Err(Error::conflict(format!("redemption already {status}")))
        }
        RedemptionTransition::Missing => Err(Error::not_found("redemption not found")),
    }
}

#[async_trait::async_trait]
impl<D, R, U> ReviewCommand for ReviewService<D, R, U>
where
    D: DepositRepository,
    R: RedemptionRepository,
    U: UserRepository,
{
    async fn approve_deposit(&self, action: ApproveAction) -> Result<Deposit, Error> {
        require_admin(self.users.as_ref(), action.admin_id).await?;

        let review = self.deposit_review(action.admin_id, action.notes);
        let transition = self
            .deposits
            .approve_crediting(action.record_id, review)
            .await
            .map_err(map_deposit_repo_error)?;

        let deposit = resolve_deposit_transition(transition)?;
        tracing::info!(
            deposit_id = %deposit.id(),
            admin_id = %action.admin_id,
            points = deposit.points_awarded(),
            "deposit approved"
        );
        Ok(deposit)
    }

    async fn reject_deposit(&self, action: RejectAction) -> Result<Deposit, Error> {
        require_admin(self.users.as_ref(), action.admin_id).await?;
        let reason = non_empty_reason(&action.reason)?;

        let review = self.deposit_review(action.admin_id, Some(reason));
        let transition = self
            .deposits
            .reject(action.record_id, review)
            .await
            .map_err(map_deposit_repo_error)?;

        let deposit = resolve_deposit_transition(transition)?;
        tracing::info!(
            deposit_id = %deposit.id(),
            admin_id = %action.admin_id,
            "deposit rejected"
        );
        Ok(deposit)
    }

    async fn complete_redemption(
        &self,
        action: ApproveAction,
    ) -> Result<RedemptionRequest, Error> {
        require_admin(self.users.as_ref(), action.admin_id).await?;

        let resolution = self.redemption_resolution(action.admin_id, action.notes);
        let transition = self
            .redemptions
            .complete(action.record_id, resolution)
            .await
            .map_err(map_redemption_repo_error)?;

        let request = resolve_redemption_transition(transition)?;
        tracing::info!(
            redemption_id = %request.id(),
            admin_id = %action.admin_id,
            "redemption completed"
        );
        Ok(request)
    }

    async fn fail_redemption(&self, action: RejectAction) -> Result<RedemptionRequest, Error> {
        require_admin(self.users.as_ref(), action.admin_id).await?;
        let reason = non_empty_reason(&action.reason)?;

        let resolution = self.redemption_resolution(action.admin_id, Some(reason));
        let transition = self
            .redemptions
            .fail_refunding(action.record_id, resolution)
            .await
            .map_err(map_redemption_repo_error)?;

        let request = resolve_redemption_transition(transition)?;
        tracing::info!(
            redemption_id = %request.id(),
            admin_id = %action.admin_id,
            refunded = request.points_used(),
            "redemption failed and refunded"
        );
        Ok(request)
    }

    async fn list_pending_deposits(&self, admin_id: UserId) -> Result<Vec<Deposit>, Error> {
        require_admin(self.users.as_ref(), admin_id).await?;
        self.deposits
            .list_pending()
            .await
            .map_err(map_deposit_repo_error)
    }

    async fn list_pending_redemptions(
        &self,
        admin_id: UserId,
    ) -> Result<Vec<RedemptionRequest>, Error> {
        require_admin(self.users.as_ref(), admin_id).await?;
        self.redemptions
            .list_pending()
            .await
            .map_err(map_redemption_repo_error)
    }
}

#[cfg(test)]
#[path = "review_service_tests.rs"]
mod tests;
