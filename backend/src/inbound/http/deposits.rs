//! Deposit HTTP handlers.
//!
//! ```text
//! POST /api/v1/deposits
//! GET  /api/v1/deposits
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::SubmitDepositRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::DepositBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_catalogue_id};

/// Request payload for submitting a deposit.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitDepositRequestBody {
    pub waste_type_id: String,
    pub weight_kg: f64,
    pub photo_ref: String,
}

/// Submit a waste deposit for the authenticated user.
///
/// Points are priced from the waste type's per-kilogram rate at submission
/// time. Whether the deposit is immediately credited or awaits review is the
/// deployment's accrual policy.
#[utoipa::path(
    post,
    path = "/api/v1/deposits",
    request_body = SubmitDepositRequestBody,
    responses(
        (status = 200, description = "Deposit recorded", body = DepositBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Unknown waste type", body = Error)
    ),
    tags = ["deposits"],
    operation_id = "submitDeposit",
    security(("SessionCookie" = []))
)]
#[post("/deposits")]
pub async fn submit_deposit(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitDepositRequestBody>,
) -> ApiResult<web::Json<DepositBody>> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();

    let deposit = state
        .deposits
        .submit_deposit(SubmitDepositRequest {
            user_id,
            waste_type_id: parse_catalogue_id(
                payload.waste_type_id,
                FieldName::new("wasteTypeId"),
            )?,
            weight_kg: payload.weight_kg,
            photo_ref: payload.photo_ref,
        })
        .await?;

    Ok(web::Json(DepositBody::from(&deposit)))
}

/// List the authenticated user's deposits, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/deposits",
    responses(
        (status = 200, description = "Deposit history", body = [DepositBody]),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["deposits"],
    operation_id = "listDeposits",
    security(("SessionCookie" = []))
)]
#[get("/deposits")]
pub async fn list_deposits(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DepositBody>>> {
    let user_id = session.require_user_id()?;
    let deposits = state.ledger.deposits_for(user_id).await?;
    Ok(web::Json(deposits.iter().map(DepositBody::from).collect()))
}

#[cfg(test)]
#[path = "deposits_tests.rs"]
mod tests;
