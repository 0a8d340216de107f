//! Catalogue HTTP handlers.
//!
//! ```text
//! GET /api/v1/config/waste-types
//! GET /api/v1/config/reward-options
//! ```

use actix_web::{get, web};

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{RewardOptionBody, WasteTypeBody};
use crate::inbound::http::state::HttpState;

/// List the active waste types.
#[utoipa::path(
    get,
    path = "/api/v1/config/waste-types",
    responses(
        (status = 200, description = "Active waste types", body = [WasteTypeBody]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listWasteTypes",
    security([])
)]
#[get("/config/waste-types")]
pub async fn list_waste_types(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<WasteTypeBody>>> {
    let waste_types = state.catalogue.waste_types().await?;
    Ok(web::Json(
        waste_types.iter().map(WasteTypeBody::from).collect(),
    ))
}

/// List the active reward options.
#[utoipa::path(
    get,
    path = "/api/v1/config/reward-options",
    responses(
        (status = 200, description = "Active reward options", body = [RewardOptionBody]),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["catalogue"],
    operation_id = "listRewardOptions",
    security([])
)]
#[get("/config/reward-options")]
pub async fn list_reward_options(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RewardOptionBody>>> {
    let options = state.catalogue.reward_options().await?;
    Ok(web::Json(
        options.iter().map(RewardOptionBody::from).collect(),
    ))
}
