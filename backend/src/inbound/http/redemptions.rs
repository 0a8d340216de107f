//! Redemption HTTP handlers.
//!
//! ```text
//! POST /api/v1/redemptions
//! GET  /api/v1/redemptions
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::RequestRedemptionRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::RedemptionBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_catalogue_id};

/// Request payload for redeeming points.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestRedemptionBody {
    pub reward_option_id: String,
    /// Payout amount in whole IDR.
    pub idr_amount: i64,
    /// Recipient wallet details, e.g. the account number to transfer to.
    pub wallet_info: String,
}

/// Request a payout for the authenticated user.
///
/// The needed points are deducted immediately; a failed payout refunds them
/// when an admin resolves the request.
#[utoipa::path(
    post,
    path = "/api/v1/redemptions",
    request_body = RequestRedemptionBody,
    responses(
        (status = 200, description = "Redemption requested", body = RedemptionBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 404, description = "Unknown reward option", body = Error),
        (status = 422, description = "Insufficient points", body = Error)
    ),
    tags = ["redemptions"],
    operation_id = "requestRedemption",
    security(("SessionCookie" = []))
)]
#[post("/redemptions")]
pub async fn request_redemption(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RequestRedemptionBody>,
) -> ApiResult<web::Json<RedemptionBody>> {
    let user_id = session.require_user_id()?;
    let payload = payload.into_inner();

    let request = state
        .redemptions
        .request_redemption(RequestRedemptionRequest {
            user_id,
            reward_option_id: parse_catalogue_id(
                payload.reward_option_id,
                FieldName::new("rewardOptionId"),
            )?,
            idr_amount: payload.idr_amount,
            wallet_info: payload.wallet_info,
        })
        .await?;

    Ok(web::Json(RedemptionBody::from(&request)))
}

/// List the authenticated user's redemption requests, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/redemptions",
    responses(
        (status = 200, description = "Redemption history", body = [RedemptionBody]),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["redemptions"],
    operation_id = "listRedemptions",
    security(("SessionCookie" = []))
)]
#[get("/redemptions")]
pub async fn list_redemptions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RedemptionBody>>> {
    let user_id = session.require_user_id()?;
    let redemptions = state.ledger.redemptions_for(user_id).await?;
    Ok(web::Json(
        redemptions.iter().map(RedemptionBody::from).collect(),
    ))
}
