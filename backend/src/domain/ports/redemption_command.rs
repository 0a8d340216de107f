//! Driving port for redemption requests.

use async_trait::async_trait;

use crate::domain::catalogue::CatalogueId;
use crate::domain::error::Error;
use crate::domain::redemption::RedemptionRequest;
use crate::domain::user::UserId;

/// Parameters for a redemption request on behalf of the authenticated user.
#[derive(Debug, Clone)]
pub struct RequestRedemptionRequest {
    pub user_id: UserId,
    pub reward_option_id: CatalogueId,
    pub idr_amount: i64,
    pub wallet_info: String,
}

/// Use-case port for creating redemption requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedemptionCommand: Send + Sync {
    /// Validate the payout, reserve the points, and persist the request.
    async fn request_redemption(
        &self,
        request: RequestRedemptionRequest,
    ) -> Result<RedemptionRequest, Error>;
}
