//! OpenAPI documentation configuration.
//!
//! Registers every REST path and the shared response schemas. The generated
//! document backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "EcoPoints backend API",
        description = "Recycling rewards ledger: deposits, points, and e-wallet redemptions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::accounts::current_user,
        crate::inbound::http::accounts::user_balance,
        crate::inbound::http::deposits::submit_deposit,
        crate::inbound::http::deposits::list_deposits,
        crate::inbound::http::redemptions::request_redemption,
        crate::inbound::http::redemptions::list_redemptions,
        crate::inbound::http::catalogue::list_waste_types,
        crate::inbound::http::catalogue::list_reward_options,
        crate::inbound::http::admin::list_pending_deposits,
        crate::inbound::http::admin::approve_deposit,
        crate::inbound::http::admin::reject_deposit,
        crate::inbound::http::admin::list_pending_redemptions,
        crate::inbound::http::admin::complete_redemption,
        crate::inbound::http::admin::fail_redemption,
        crate::inbound::http::admin::admin_stats,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::inbound::http::schemas::UserBody,
        crate::inbound::http::schemas::DepositBody,
        crate::inbound::http::schemas::RedemptionBody,
        crate::inbound::http::schemas::WasteTypeBody,
        crate::inbound::http::schemas::RewardOptionBody,
        crate::inbound::http::schemas::StatsBody,
        crate::inbound::http::accounts::RegisterRequestBody,
        crate::inbound::http::accounts::LoginRequestBody,
        crate::inbound::http::accounts::BalanceBody,
        crate::inbound::http::deposits::SubmitDepositRequestBody,
        crate::inbound::http::redemptions::RequestRedemptionBody,
        crate::inbound::http::admin::ReviewNotesBody,
        crate::inbound::http::admin::ReviewReasonBody,
    ))
)]
pub struct ApiDoc;
