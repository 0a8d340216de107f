//! PostgreSQL-backed `RedemptionRepository` implementation using Diesel.
//!
//! Reservation is a conditional balance update plus the request insert in one
//! transaction: `UPDATE users SET points = points - n WHERE id = ? AND
//! points >= n`. When that update matches no row the balance did not cover
//! the deduction and nothing is written. Resolution mirrors the deposit
//! adapter's compare-and-swap, with the refund for failures riding in the
//! same transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::catalogue::CatalogueId;
use crate::domain::ports::{
    RedemptionRepository, RedemptionRepositoryError, RedemptionReservation, RedemptionTransition,
};
use crate::domain::redemption::{
    RedemptionDraft, RedemptionRequest, RedemptionResolution, RedemptionStatus,
};
use crate::domain::user::UserId;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRedemptionRow, RedemptionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{redemptions, users};

/// Diesel-backed implementation of the redemption repository port.
#[derive(Clone)]
pub struct DieselRedemptionRepository {
    pool: DbPool,
}

impl DieselRedemptionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> RedemptionRepositoryError {
    map_pool_error(error, |message| {
        RedemptionRepositoryError::connection(message)
    })
}

fn map_diesel(error: diesel::result::Error) -> RedemptionRepositoryError {
    map_diesel_error(
        error,
        RedemptionRepositoryError::query,
        RedemptionRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain redemption request.
pub(super) fn row_to_redemption(
    row: RedemptionRow,
) -> Result<RedemptionRequest, RedemptionRepositoryError> {
    let status = row
        .status
        .parse::<RedemptionStatus>()
        .map_err(|err| RedemptionRepositoryError::query(format!("decode status: {err}")))?;

    let resolution = match row.admin_id {
        Some(admin_id) => Some(RedemptionResolution {
            admin_id: UserId::from_uuid(admin_id),
            notes: row.admin_notes,
            processed_at: row.processed_at.ok_or_else(|| {
                RedemptionRepositoryError::query("resolved redemption is missing processed_at")
            })?,
        }),
        None => None,
    };

    RedemptionRequest::new(RedemptionDraft {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        reward_option_id: CatalogueId::new(row.reward_option_id).map_err(|err| {
            RedemptionRepositoryError::query(format!("decode reward option: {err}"))
        })?,
        idr_amount: row.idr_amount,
        points_used: row.points_used,
        status,
        wallet_info: row.wallet_info,
        resolution,
        created_at: row.created_at,
    })
    .map_err(|err| RedemptionRepositoryError::query(err.to_string()))
}

/// Transaction-internal reservation outcome.
enum RawReservation {
    Reserved,
    Insufficient(i64),
    MissingUser,
}

/// Transaction-internal transition outcome, before domain conversion.
enum RawTransition {
    Applied(RedemptionRow),
    Resolved(String),
    Missing,
}

fn finish_transition(
    raw: RawTransition,
) -> Result<RedemptionTransition, RedemptionRepositoryError> {
    match raw {
        RawTransition::Applied(row) => Ok(RedemptionTransition::Applied(row_to_redemption(row)?)),
        RawTransition::Resolved(status) => {
            let status = status.parse::<RedemptionStatus>().map_err(|err| {
                RedemptionRepositoryError::query(format!("decode status: {err}"))
            })?;
            Ok(RedemptionTransition::AlreadyResolved(status))
        }
        RawTransition::Missing => Ok(RedemptionTransition::Missing),
    }
}

/// Distinguish a missing record from a lost compare-and-swap.
async fn lost_race_outcome(
    conn: &mut diesel_async::AsyncPgConnection,
    request_id: Uuid,
) -> Result<RawTransition, diesel::result::Error> {
    let status: Option<String> = redemptions::table
        .filter(redemptions::id.eq(request_id))
        .select(redemptions::status)
        .first(conn)
        .await
        .optional()?;
    Ok(match status {
        Some(status) => RawTransition::Resolved(status),
        None => RawTransition::Missing,
    })
}

#[async_trait]
impl RedemptionRepository for DieselRedemptionRepository {
    async fn insert_reserving(
        &self,
        request: &RedemptionRequest,
    ) -> Result<RedemptionReservation, RedemptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = NewRedemptionRow {
            id: request.id(),
            user_id: *request.user_id().as_uuid(),
            reward_option_id: request.reward_option_id().as_ref(),
            idr_amount: request.idr_amount(),
            points_used: request.points_used(),
            status: request.status().as_str(),
            wallet_info: request.wallet_info(),
            created_at: request.created_at(),
        };
        let owner = *request.user_id().as_uuid();
        let deduction = request.points_used();

        let raw = conn
            .transaction::<RawReservation, diesel::result::Error, _>(|conn| {
                async move {
                    let deducted = diesel::update(
                        users::table
                            .filter(users::id.eq(owner).and(users::points.ge(deduction))),
                    )
                    .set(users::points.eq(users::points - deduction))
                    .execute(conn)
                    .await?;

                    if deducted == 0 {
                        let balance: Option<i64> = users::table
                            .filter(users::id.eq(owner))
                            .select(users::points)
                            .first(conn)
                            .await
                            .optional()?;
                        return Ok(match balance {
                            Some(balance) => RawReservation::Insufficient(balance),
                            None => RawReservation::MissingUser,
                        });
                    }

                    diesel::insert_into(redemptions::table)
                        .values(&row)
                        .execute(conn)
                        .await?;
                    Ok(RawReservation::Reserved)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        Ok(match raw {
            RawReservation::Reserved => RedemptionReservation::Reserved,
            RawReservation::Insufficient(balance) => {
                RedemptionReservation::InsufficientBalance { balance }
            }
            RawReservation::MissingUser => RedemptionReservation::MissingUser,
        })
    }

    async fn complete(
        &self,
        request_id: Uuid,
        resolution: RedemptionResolution,
    ) -> Result<RedemptionTransition, RedemptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let admin_id = *resolution.admin_id.as_uuid();

        let raw = conn
            .transaction::<RawTransition, diesel::result::Error, _>(|conn| {
                async move {
                    let updated = diesel::update(
                        redemptions::table.filter(
                            redemptions::id
                                .eq(request_id)
                                .and(redemptions::status.eq(RedemptionStatus::Pending.as_str())),
                        ),
                    )
                    .set((
                        redemptions::status.eq(RedemptionStatus::Completed.as_str()),
                        redemptions::admin_id.eq(Some(admin_id)),
                        redemptions::admin_notes.eq(resolution.notes.clone()),
                        redemptions::processed_at.eq(Some(resolution.processed_at)),
                    ))
                    .returning(RedemptionRow::as_returning())
                    .get_result::<RedemptionRow>(conn)
                    .await
                    .optional()?;

                    match updated {
                        Some(row) => Ok(RawTransition::Applied(row)),
                        None => lost_race_outcome(conn, request_id).await,
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        finish_transition(raw)
    }

    async fn fail_refunding(
        &self,
        request_id: Uuid,
        resolution: RedemptionResolution,
    ) -> Result<RedemptionTransition, RedemptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let admin_id = *resolution.admin_id.as_uuid();

        let raw = conn
            .transaction::<RawTransition, diesel::result::Error, _>(|conn| {
                async move {
                    let updated = diesel::update(
                        redemptions::table.filter(
                            redemptions::id
                                .eq(request_id)
                                .and(redemptions::status.eq(RedemptionStatus::Pending.as_str())),
                        ),
                    )
                    .set((
                        redemptions::status.eq(RedemptionStatus::Failed.as_str()),
                        redemptions::admin_id.eq(Some(admin_id)),
                        redemptions::admin_notes.eq(resolution.notes.clone()),
                        redemptions::processed_at.eq(Some(resolution.processed_at)),
                    ))
                    .returning(RedemptionRow::as_returning())
                    .get_result::<RedemptionRow>(conn)
                    .await
                    .optional()?;

                    match updated {
                        Some(row) => {
                            diesel::update(users::table.filter(users::id.eq(row.user_id)))
                                .set(users::points.eq(users::points + row.points_used))
                                .execute(conn)
                                .await?;
                            Ok(RawTransition::Applied(row))
                        }
                        None => lost_race_outcome(conn, request_id).await,
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        finish_transition(raw)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RedemptionRequest>, RedemptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<RedemptionRow> = redemptions::table
            .filter(redemptions::user_id.eq(user_id.as_uuid()))
            .order((redemptions::created_at.desc(), redemptions::id.desc()))
            .select(RedemptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_redemption).collect()
    }

    async fn list_pending(&self) -> Result<Vec<RedemptionRequest>, RedemptionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<RedemptionRow> = redemptions::table
            .filter(redemptions::status.eq(RedemptionStatus::Pending.as_str()))
            .order((redemptions::created_at.desc(), redemptions::id.desc()))
            .select(RedemptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_redemption).collect()
    }
}
