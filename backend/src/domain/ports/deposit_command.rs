//! Driving port for deposit submission.

use async_trait::async_trait;

use crate::domain::catalogue::CatalogueId;
use crate::domain::deposit::Deposit;
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// Parameters for a deposit submission on behalf of the authenticated user.
#[derive(Debug, Clone)]
pub struct SubmitDepositRequest {
    pub user_id: UserId,
    pub waste_type_id: CatalogueId,
    pub weight_kg: f64,
    pub photo_ref: String,
}

/// Use-case port for creating deposits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepositCommand: Send + Sync {
    /// Validate, price, and persist a new deposit. Under the auto-approve
    /// policy the returned record is already approved and credited.
    async fn submit_deposit(&self, request: SubmitDepositRequest) -> Result<Deposit, Error>;
}
