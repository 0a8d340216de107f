//! Redemption engine: payout validation and points reservation.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::error::Error;
use crate::domain::points::points_for_payout;
use crate::domain::policy::PlatformRates;
use crate::domain::ports::{
    CatalogueRepository, RedemptionCommand, RedemptionRepository, RedemptionReservation,
    RequestRedemptionRequest, UserRepository,
};
use crate::domain::redemption::{RedemptionDraft, RedemptionRequest, RedemptionStatus};

use super::accrual_service::{map_catalogue_repo_error, map_user_repo_error};
use super::review_service::map_redemption_repo_error;

/// Redemption engine implementing the request driving port.
///
/// The points deduction happens inside the repository's conditional insert;
/// this service never reads a balance and writes it back. The balance
/// snapshot it does read is only used for the reward option's minimum-points
/// gate and for error messages.
#[derive(Clone)]
pub struct RedemptionCommandService<R, U, C> {
    redemptions: Arc<R>,
    users: Arc<U>,
    catalogue: Arc<C>,
    clock: Arc<dyn Clock>,
    rates: PlatformRates,
}

impl<R, U, C> RedemptionCommandService<R, U, C> {
    /// Create the redemption engine with its collaborators and rates.
    pub fn new(
        redemptions: Arc<R>,
        users: Arc<U>,
        catalogue: Arc<C>,
        clock: Arc<dyn Clock>,
        rates: PlatformRates,
    ) -> Self {
        Self {
            redemptions,
            users,
            catalogue,
            clock,
            rates,
        }
    }

    fn validate(&self, request: &RequestRedemptionRequest) -> Result<(), Error> {
        if request.idr_amount < self.rates.min_redeem_idr {
            return Err(Error::invalid_request(format!(
                "idrAmount must be at least {}",
                self.rates.min_redeem_idr
            ))
            .with_details(json!({
                "field": "idrAmount",
                "value": request.idr_amount,
            })));
        }
        if request.idr_amount % self.rates.redeem_unit_idr != 0 {
            return Err(Error::invalid_request(format!(
                "idrAmount must be a multiple of {}",
                self.rates.redeem_unit_idr
            ))
            .with_details(json!({
                "field": "idrAmount",
                "value": request.idr_amount,
            })));
        }
        if request.wallet_info.trim().is_empty() {
            return Err(Error::invalid_request("walletInfo must not be empty")
                .with_details(json!({ "field": "walletInfo" })));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<R, U, C> RedemptionCommand for RedemptionCommandService<R, U, C>
where
    R: RedemptionRepository,
    U: UserRepository,
    C: CatalogueRepository,
{
    async fn request_redemption(
        &self,
        request: RequestRedemptionRequest,
    ) -> Result<RedemptionRequest, Error> {
        self.validate(&request)?;

        let user = self
            .users
            .find_by_id(request.user_id)
            .await
            .map_err(map_user_repo_error)?
            .ok_or_else(|| Error::not_found(format!("user {} not found", request.user_id)))?;

        let option = self
            .catalogue
            .find_reward_option(&request.reward_option_id)
            .await
            .map_err(map_catalogue_repo_error)?
            .filter(|option| option.is_active())
            .ok_or_else(|| {
                Error::not_found(format!(
                    "reward option {} not found or inactive",
                    request.reward_option_id
                ))
            })?;

        if user.points() < option.min_points_to_redeem() {
            return Err(Error::insufficient_points(format!(
                "balance below the {} point minimum for {}",
                option.min_points_to_redeem(),
                option.name()
            ))
            .with_details(json!({
                "balance": user.points(),
                "minPointsToRedeem": option.min_points_to_redeem(),
            })));
        }

        let points_used = points_for_payout(request.idr_amount, self.rates.points_to_idr);
        let record = RedemptionRequest::new(RedemptionDraft {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            reward_option_id: request.reward_option_id,
            idr_amount: request.idr_amount,
            points_used,
            status: RedemptionStatus::Pending,
            wallet_info: request.wallet_info,
            resolution: None,
            created_at: self.clock.utc(),
        })
        .map_err(|err| Error::internal(format!("constructed invalid redemption: {err}")))?;

        match self
            .redemptions
            .insert_reserving(&record)
            .await
            .map_err(map_redemption_repo_error)?
        {
            RedemptionReservation::Reserved => {
                tracing::info!(
                    redemption_id = %record.id(),
                    user_id = %record.user_id(),
                    points = record.points_used(),
                    idr = record.idr_amount(),
                    "redemption reserved"
                );
                Ok(record)
            }
            RedemptionReservation::InsufficientBalance { balance } => {
                Err(Error::insufficient_points(format!(
                    "redemption needs {points_used} points but the balance is {balance}"
                ))
                .with_details(json!({
                    "pointsUsed": points_used,
                    "balance": balance,
                })))
            }
            RedemptionReservation::MissingUser => {
                Err(Error::not_found(format!("user {} not found", record.user_id())))
            }
        }
    }
}

#[cfg(test)]
#[path = "redemption_service_tests.rs"]
mod tests;
