//! Row structs bridging Diesel and the domain entities.
//!
//! Reads go through `*Row` structs and validated domain constructors; writes
//! go through `New*Row` structs borrowing from the domain values. Conversion
//! into domain types lives with the repository that owns the table.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{deposits, redemptions, reward_options, users, waste_types};

/// Full user row, including the credential hash.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password_hash: String,
    pub points: i64,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable user row.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub password_hash: &'a str,
    pub points: i64,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Deposit row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = deposits)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DepositRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub waste_type_id: String,
    pub weight_kg: f64,
    pub points_awarded: i64,
    pub status: String,
    pub photo_ref: String,
    pub admin_id: Option<Uuid>,
    pub admin_notes: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insertable deposit row.
#[derive(Debug, Insertable)]
#[diesel(table_name = deposits)]
pub struct NewDepositRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub waste_type_id: &'a str,
    pub weight_kg: f64,
    pub points_awarded: i64,
    pub status: &'a str,
    pub photo_ref: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Redemption row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = redemptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RedemptionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reward_option_id: String,
    pub idr_amount: i64,
    pub points_used: i64,
    pub status: String,
    pub wallet_info: String,
    pub admin_id: Option<Uuid>,
    pub admin_notes: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Insertable redemption row.
#[derive(Debug, Insertable)]
#[diesel(table_name = redemptions)]
pub struct NewRedemptionRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub reward_option_id: &'a str,
    pub idr_amount: i64,
    pub points_used: i64,
    pub status: &'a str,
    pub wallet_info: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Waste type row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = waste_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WasteTypeRow {
    pub id: String,
    pub name: String,
    pub points_per_kg: i64,
    pub is_active: bool,
}

/// Reward option row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reward_options)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RewardOptionRow {
    pub id: String,
    pub name: String,
    pub min_points_to_redeem: i64,
    pub rate: i64,
    pub is_active: bool,
}
