//! Admin review HTTP handlers.
//!
//! ```text
//! GET  /api/v1/admin/deposits/pending
//! POST /api/v1/admin/deposits/{id}/approve
//! POST /api/v1/admin/deposits/{id}/reject
//! GET  /api/v1/admin/redemptions/pending
//! POST /api/v1/admin/redemptions/{id}/complete
//! POST /api/v1/admin/redemptions/{id}/fail
//! GET  /api/v1/admin/stats
//! ```
//!
//! The session only proves who is calling; the admin role is re-checked by
//! the review service against the store on every call.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{ApproveAction, RejectAction};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{DepositBody, RedemptionBody, StatsBody};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_uuid};

/// Optional notes for approvals and completions.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewNotesBody {
    pub notes: Option<String>,
}

/// Mandatory reason for rejections and failures.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReviewReasonBody {
    pub reason: String,
}

/// List deposits awaiting review.
#[utoipa::path(
    get,
    path = "/api/v1/admin/deposits/pending",
    responses(
        (status = 200, description = "Pending deposits", body = [DepositBody]),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Admin account required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listPendingDeposits",
    security(("SessionCookie" = []))
)]
#[get("/admin/deposits/pending")]
pub async fn list_pending_deposits(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<DepositBody>>> {
    let admin_id = session.require_user_id()?;
    let deposits = state.review.list_pending_deposits(admin_id).await?;
    Ok(web::Json(deposits.iter().map(DepositBody::from).collect()))
}

/// Approve a pending deposit, crediting its points.
#[utoipa::path(
    post,
    path = "/api/v1/admin/deposits/{id}/approve",
    params(("id" = String, Path, description = "Deposit id")),
    request_body = ReviewNotesBody,
    responses(
        (status = 200, description = "Deposit approved", body = DepositBody),
        (status = 403, description = "Admin account required", body = Error),
        (status = 404, description = "Deposit not found", body = Error),
        (status = 409, description = "Deposit already resolved", body = Error)
    ),
    tags = ["admin"],
    operation_id = "approveDeposit",
    security(("SessionCookie" = []))
)]
#[post("/admin/deposits/{id}/approve")]
pub async fn approve_deposit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewNotesBody>,
) -> ApiResult<web::Json<DepositBody>> {
    let admin_id = session.require_user_id()?;
    let record_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;

    let deposit = state
        .review
        .approve_deposit(ApproveAction {
            record_id,
            admin_id,
            notes: payload.into_inner().notes,
        })
        .await?;

    Ok(web::Json(DepositBody::from(&deposit)))
}

/// Reject a pending deposit; the balance is untouched.
#[utoipa::path(
    post,
    path = "/api/v1/admin/deposits/{id}/reject",
    params(("id" = String, Path, description = "Deposit id")),
    request_body = ReviewReasonBody,
    responses(
        (status = 200, description = "Deposit rejected", body = DepositBody),
        (status = 400, description = "Missing rejection reason", body = Error),
        (status = 403, description = "Admin account required", body = Error),
        (status = 404, description = "Deposit not found", body = Error),
        (status = 409, description = "Deposit already resolved", body = Error)
    ),
    tags = ["admin"],
    operation_id = "rejectDeposit",
    security(("SessionCookie" = []))
)]
#[post("/admin/deposits/{id}/reject")]
pub async fn reject_deposit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewReasonBody>,
) -> ApiResult<web::Json<DepositBody>> {
    let admin_id = session.require_user_id()?;
    let record_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;

    let deposit = state
        .review
        .reject_deposit(RejectAction {
            record_id,
            admin_id,
            reason: payload.into_inner().reason,
        })
        .await?;

    Ok(web::Json(DepositBody::from(&deposit)))
}

/// List redemption requests awaiting resolution.
#[utoipa::path(
    get,
    path = "/api/v1/admin/redemptions/pending",
    responses(
        (status = 200, description = "Pending redemptions", body = [RedemptionBody]),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Admin account required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "listPendingRedemptions",
    security(("SessionCookie" = []))
)]
#[get("/admin/redemptions/pending")]
pub async fn list_pending_redemptions(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<RedemptionBody>>> {
    let admin_id = session.require_user_id()?;
    let redemptions = state.review.list_pending_redemptions(admin_id).await?;
    Ok(web::Json(
        redemptions.iter().map(RedemptionBody::from).collect(),
    ))
}

/// Mark a pending redemption as paid out.
#[utoipa::path(
    post,
    path = "/api/v1/admin/redemptions/{id}/complete",
    params(("id" = String, Path, description = "Redemption id")),
    request_body = ReviewNotesBody,
    responses(
        (status = 200, description = "Redemption completed", body = RedemptionBody),
        (status = 403, description = "Admin account required", body = Error),
        (status = 404, description = "Redemption not found", body = Error),
        (status = 409, description = "Redemption already resolved", body = Error)
    ),
    tags = ["admin"],
    operation_id = "completeRedemption",
    security(("SessionCookie" = []))
)]
#[post("/admin/redemptions/{id}/complete")]
pub async fn complete_redemption(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewNotesBody>,
) -> ApiResult<web::Json<RedemptionBody>> {
    let admin_id = session.require_user_id()?;
    let record_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;

    let request = state
        .review
        .complete_redemption(ApproveAction {
            record_id,
            admin_id,
            notes: payload.into_inner().notes,
        })
        .await?;

    Ok(web::Json(RedemptionBody::from(&request)))
}

/// Fail a pending redemption, refunding its points.
#[utoipa::path(
    post,
    path = "/api/v1/admin/redemptions/{id}/fail",
    params(("id" = String, Path, description = "Redemption id")),
    request_body = ReviewReasonBody,
    responses(
        (status = 200, description = "Redemption failed and refunded", body = RedemptionBody),
        (status = 400, description = "Missing failure reason", body = Error),
        (status = 403, description = "Admin account required", body = Error),
        (status = 404, description = "Redemption not found", body = Error),
        (status = 409, description = "Redemption already resolved", body = Error)
    ),
    tags = ["admin"],
    operation_id = "failRedemption",
    security(("SessionCookie" = []))
)]
#[post("/admin/redemptions/{id}/fail")]
pub async fn fail_redemption(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ReviewReasonBody>,
) -> ApiResult<web::Json<RedemptionBody>> {
    let admin_id = session.require_user_id()?;
    let record_id = parse_uuid(&path.into_inner(), FieldName::new("id"))?;

    let request = state
        .review
        .fail_redemption(RejectAction {
            record_id,
            admin_id,
            reason: payload.into_inner().reason,
        })
        .await?;

    Ok(web::Json(RedemptionBody::from(&request)))
}

/// Dashboard aggregates for the admin overview.
#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = StatsBody),
        (status = 401, description = "Unauthorized", body = Error),
        (status = 403, description = "Admin account required", body = Error)
    ),
    tags = ["admin"],
    operation_id = "adminStats",
    security(("SessionCookie" = []))
)]
#[get("/admin/stats")]
pub async fn admin_stats(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StatsBody>> {
    let admin_id = session.require_user_id()?;
    let stats = state.stats.dashboard_stats(admin_id).await?;
    Ok(web::Json(StatsBody::from(stats)))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
