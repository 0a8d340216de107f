//! Shared JSON response bodies for the REST surface.
//!
//! Domain entities stay framework-agnostic; these bodies own the camelCase
//! wire shape and the OpenAPI schema definitions.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::catalogue::{RewardOption, WasteType};
use crate::domain::deposit::Deposit;
use crate::domain::ports::DashboardStats;
use crate::domain::redemption::RedemptionRequest;
use crate::domain::user::User;

/// Account profile returned by the auth and profile endpoints.
///
/// The credential hash is not part of the domain user and can never appear
/// here.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub points: i64,
    #[schema(example = "user")]
    pub role: String,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&User> for UserBody {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
            phone: user.phone().as_ref().to_owned(),
            points: user.points(),
            role: user.role().as_str().to_owned(),
            created_at: user.created_at().to_rfc3339(),
        }
    }
}

/// Deposit record returned by the submission, history, and review endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepositBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub waste_type_id: String,
    pub weight_kg: f64,
    pub points_awarded: i64,
    #[schema(example = "pending")]
    pub status: String,
    pub photo_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "uuid")]
    pub admin_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time")]
    pub processed_at: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&Deposit> for DepositBody {
    fn from(deposit: &Deposit) -> Self {
        let review = deposit.review();
        Self {
            id: deposit.id().to_string(),
            user_id: deposit.user_id().to_string(),
            waste_type_id: deposit.waste_type_id().to_string(),
            weight_kg: deposit.weight_kg(),
            points_awarded: deposit.points_awarded(),
            status: deposit.status().to_string(),
            photo_ref: deposit.photo_ref().to_owned(),
            admin_id: review.map(|r| r.admin_id.to_string()),
            admin_notes: review.and_then(|r| r.notes.clone()),
            processed_at: review.map(|r| r.processed_at.to_rfc3339()),
            created_at: deposit.created_at().to_rfc3339(),
        }
    }
}

/// Redemption record returned by the request, history, and review endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    pub reward_option_id: String,
    pub idr_amount: i64,
    pub points_used: i64,
    #[schema(example = "pending")]
    pub status: String,
    pub wallet_info: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "uuid")]
    pub admin_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(format = "date-time")]
    pub processed_at: Option<String>,
    #[schema(format = "date-time")]
    pub created_at: String,
}

impl From<&RedemptionRequest> for RedemptionBody {
    fn from(request: &RedemptionRequest) -> Self {
        let resolution = request.resolution();
        Self {
            id: request.id().to_string(),
            user_id: request.user_id().to_string(),
            reward_option_id: request.reward_option_id().to_string(),
            idr_amount: request.idr_amount(),
            points_used: request.points_used(),
            status: request.status().to_string(),
            wallet_info: request.wallet_info().to_owned(),
            admin_id: resolution.map(|r| r.admin_id.to_string()),
            admin_notes: resolution.and_then(|r| r.notes.clone()),
            processed_at: resolution.map(|r| r.processed_at.to_rfc3339()),
            created_at: request.created_at().to_rfc3339(),
        }
    }
}

/// Waste type catalogue entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WasteTypeBody {
    pub id: String,
    pub name: String,
    pub points_per_kg: i64,
}

impl From<&WasteType> for WasteTypeBody {
    fn from(waste_type: &WasteType) -> Self {
        Self {
            id: waste_type.id().to_string(),
            name: waste_type.name().to_owned(),
            points_per_kg: waste_type.points_per_kg(),
        }
    }
}

/// Reward option catalogue entry.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RewardOptionBody {
    pub id: String,
    pub name: String,
    pub min_points_to_redeem: i64,
    pub rate: i64,
}

impl From<&RewardOption> for RewardOptionBody {
    fn from(option: &RewardOption) -> Self {
        Self {
            id: option.id().to_string(),
            name: option.name().to_owned(),
            min_points_to_redeem: option.min_points_to_redeem(),
            rate: option.rate(),
        }
    }
}

/// Dashboard aggregates for the admin overview.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsBody {
    pub pending_count: i64,
    pub today_deposits: i64,
    pub total_users: i64,
    pub total_weight: f64,
}

impl From<DashboardStats> for StatsBody {
    fn from(stats: DashboardStats) -> Self {
        Self {
            pending_count: stats.pending_deposits,
            today_deposits: stats.deposits_today,
            total_users: stats.registered_users,
            total_weight: stats.approved_weight_kg,
        }
    }
}
