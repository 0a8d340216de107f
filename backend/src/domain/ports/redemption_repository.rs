//! Port for redemption persistence, reservation, and refunds.
//!
//! Reservation deducts the points in the same atomic unit that inserts the
//! request, conditioned on the balance actually covering the deduction —
//! there is no read-then-write gap for a concurrent request to slip into.
//! Resolution mirrors the deposit transitions: compare-and-swap on
//! `status = 'pending'`, with the refund (for failures) riding in the same
//! transaction as the status write.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::redemption::{RedemptionRequest, RedemptionResolution, RedemptionStatus};
use crate::domain::user::UserId;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by redemption repository adapters.
    pub enum RedemptionRepositoryError {
        /// Repository connection could not be established.
        Connection => "redemption repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "redemption repository query failed: {message}",
    }
}

/// Outcome of a conditional points reservation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionReservation {
    /// Points were deducted and the request persisted.
    Reserved,
    /// The balance did not cover the deduction; nothing changed.
    InsufficientBalance {
        /// Balance observed when the conditional update matched no row.
        balance: i64,
    },
    /// The owning user does not exist.
    MissingUser,
}

/// Outcome of a guarded redemption transition.
#[derive(Debug, Clone, PartialEq)]
pub enum RedemptionTransition {
    /// The caller won the compare-and-swap.
    Applied(RedemptionRequest),
    /// The record had already reached a terminal state; nothing changed.
    AlreadyResolved(RedemptionStatus),
    /// No record exists under the identifier.
    Missing,
}

/// Port for writing redemption requests and driving their lifecycle.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedemptionRepository: Send + Sync {
    /// Deduct `points_used` from the owning balance and persist the pending
    /// request, as one conditional atomic unit.
    async fn insert_reserving(
        &self,
        request: &RedemptionRequest,
    ) -> Result<RedemptionReservation, RedemptionRepositoryError>;

    /// Complete a pending redemption. Points were already deducted at
    /// reservation time, so the balance is untouched.
    async fn complete(
        &self,
        request_id: Uuid,
        resolution: RedemptionResolution,
    ) -> Result<RedemptionTransition, RedemptionRepositoryError>;

    /// Fail a pending redemption and refund its reserved points, atomically.
    async fn fail_refunding(
        &self,
        request_id: Uuid,
        resolution: RedemptionResolution,
    ) -> Result<RedemptionTransition, RedemptionRepositoryError>;

    /// List a user's redemption requests, newest first.
    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RedemptionRequest>, RedemptionRepositoryError>;

    /// List all pending redemption requests, newest first.
    async fn list_pending(&self) -> Result<Vec<RedemptionRequest>, RedemptionRepositoryError>;
}
