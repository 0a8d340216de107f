//! Account HTTP handlers: registration, login, profile, and balance.
//!
//! ```text
//! POST /api/v1/auth/register
//! POST /api/v1/auth/login
//! POST /api/v1/auth/logout
//! GET  /api/v1/me
//! GET  /api/v1/me/balance
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::ports::{LoginRequest, RegisterAccountRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::UserBody;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_display_name, parse_email, parse_phone,
};

/// Request payload for account registration.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Request payload for login.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    pub email: String,
    pub password: String,
}

/// Balance payload for the dedicated balance endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceBody {
    pub points: i64,
}

/// Register a new account and start a session for it.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequestBody,
    responses(
        (status = 200, description = "Account created", body = UserBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequestBody>,
) -> ApiResult<web::Json<UserBody>> {
    let payload = payload.into_inner();
    let request = RegisterAccountRequest {
        name: parse_display_name(payload.name, FieldName::new("name"))?,
        email: parse_email(payload.email, FieldName::new("email"))?,
        phone: parse_phone(payload.phone, FieldName::new("phone"))?,
        password: payload.password,
    };

    let user = state.accounts.register(request).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(UserBody::from(&user)))
}

/// Authenticate and start a session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Authenticated", body = UserBody),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequestBody>,
) -> ApiResult<web::Json<UserBody>> {
    let payload = payload.into_inner();
    let request = LoginRequest {
        email: parse_email(payload.email, FieldName::new("email"))?,
        password: payload.password,
    };

    let user = state.accounts.login(request).await?;
    session.persist_user(user.id())?;
    Ok(web::Json(UserBody::from(&user)))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses((status = 204, description = "Session ended")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Fetch the authenticated user's profile.
#[utoipa::path(
    get,
    path = "/api/v1/me",
    responses(
        (status = 200, description = "Profile", body = UserBody),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("SessionCookie" = []))
)]
#[get("/me")]
pub async fn current_user(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<UserBody>> {
    let user_id = session.require_user_id()?;
    let user = state.ledger.profile(user_id).await?;
    Ok(web::Json(UserBody::from(&user)))
}

/// Fetch the authenticated user's points balance.
#[utoipa::path(
    get,
    path = "/api/v1/me/balance",
    responses(
        (status = 200, description = "Points balance", body = BalanceBody),
        (status = 401, description = "Unauthorized", body = Error)
    ),
    tags = ["auth"],
    operation_id = "userBalance",
    security(("SessionCookie" = []))
)]
#[get("/me/balance")]
pub async fn user_balance(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<BalanceBody>> {
    let user_id = session.require_user_id()?;
    let points = state.ledger.balance(user_id).await?;
    Ok(web::Json(BalanceBody { points }))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
