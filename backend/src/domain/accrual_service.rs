//! Points accrual engine: deposit submission and pricing.

use std::sync::Arc;

use mockable::Clock;
use serde_json::json;
use uuid::Uuid;

use crate::domain::deposit::{Deposit, DepositDraft, DepositStatus};
use crate::domain::error::Error;
use crate::domain::points::points_for_weight;
use crate::domain::policy::{AccrualPolicy, DepositLimits};
use crate::domain::ports::{
    CatalogueRepository, CatalogueRepositoryError, DepositCommand, DepositRepository,
    DepositRepositoryError, SubmitDepositRequest, UserRepository, UserRepositoryError,
};

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

pub(crate) fn map_user_repo_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_catalogue_repo_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue repository unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue repository error: {message}"))
        }
    }
}

/// Accrual engine implementing the deposit submission driving port.
///
/// The deployment's [`AccrualPolicy`] is fixed at construction: the service
/// either always creates pending deposits or always creates approved,
/// credited ones. It never mixes the two.
#[derive(Clone)]
pub struct DepositCommandService<D, U, C> {
    deposits: Arc<D>,
    users: Arc<U>,
    catalogue: Arc<C>,
    clock: Arc<dyn Clock>,
    policy: AccrualPolicy,
    limits: DepositLimits,
}

impl<D, U, C> DepositCommandService<D, U, C> {
    /// Create the accrual engine with its collaborators and policy.
    pub fn new(
        deposits: Arc<D>,
        users: Arc<U>,
        catalogue: Arc<C>,
        clock: Arc<dyn Clock>,
        policy: AccrualPolicy,
        limits: DepositLimits,
    ) -> Self {
        Self {
            deposits,
            users,
            catalogue,
            clock,
            policy,
            limits,
        }
    }

    fn validate(&self, request: &SubmitDepositRequest) -> Result<(), Error> {
        if !(request.weight_kg.is_finite() && request.weight_kg > 0.0) {
            return Err(
                Error::invalid_request("weightKg must be greater than zero").with_details(json!({
                    "field": "weightKg",
                    "value": request.weight_kg.to_string(),
                })),
            );
        }
        if request.weight_kg > self.limits.max_weight_kg {
            return Err(Error::invalid_request(format!(
                "weightKg must not exceed {} kg",
                self.limits.max_weight_kg
            ))
            .with_details(json!({
                "field": "weightKg",
                "value": request.weight_kg.to_string(),
            })));
        }
        if request.photo_ref.trim().is_empty() {
            return Err(Error::invalid_request("photoRef must not be empty")
                .with_details(json!({ "field": "photoRef" })));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<D, U, C> DepositCommand for DepositCommandService<D, U, C>
where
    D: DepositRepository,
    U: UserRepository,
    C: CatalogueRepository,
{
    async fn submit_deposit(&self, request: SubmitDepositRequest) -> Result<Deposit, Error> {
        self.validate(&request)?;

        self.users
            .find_by_id(request.user_id)
            .await
            .map_err(map_user_repo_error)?
            .ok_or_else(|| Error::not_found(format!("user {} not found", request.user_id)))?;

        let waste_type = self
            .catalogue
            .find_waste_type(&request.waste_type_id)
            .await
            .map_err(map_catalogue_repo_error)?
            .filter(|waste_type| waste_type.is_active())
            .ok_or_else(|| {
                Error::not_found(format!(
                    "waste type {} not found or inactive",
                    request.waste_type_id
                ))
            })?;

        let points_awarded = points_for_weight(request.weight_kg, waste_type.points_per_kg());
        let status = match self.policy {
            AccrualPolicy::ReviewRequired => DepositStatus::Pending,
            AccrualPolicy::AutoApprove => DepositStatus::Approved,
        };

        let deposit = Deposit::new(DepositDraft {
            id: Uuid::new_v4(),
            user_id: request.user_id,
            waste_type_id: request.waste_type_id,
            weight_kg: request.weight_kg,
            points_awarded,
            status,
            photo_ref: request.photo_ref,
            review: None,
            created_at: self.clock.utc(),
        })
        .map_err(|err| Error::internal(format!("constructed invalid deposit: {err}")))?;

        match self.policy {
            AccrualPolicy::ReviewRequired => self
                .deposits
                .insert_pending(&deposit)
                .await
                .map_err(map_deposit_repo_error)?,
            AccrualPolicy::AutoApprove => self
                .deposits
                .insert_approved_crediting(&deposit)
                .await
                .map_err(map_deposit_repo_error)?,
        }

        tracing::info!(
            deposit_id = %deposit.id(),
            user_id = %deposit.user_id(),
            points = deposit.points_awarded(),
            status = %deposit.status(),
            "deposit recorded"
        );
        Ok(deposit)
    }
}

#[cfg(test)]
#[path = "accrual_service_tests.rs"]
mod tests;
