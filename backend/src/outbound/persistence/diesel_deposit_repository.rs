//! PostgreSQL-backed `DepositRepository` implementation using Diesel.
//!
//! Transition exclusivity comes from the database: the status write is a
//! single `UPDATE ... WHERE status = 'pending'`, so of two racing reviewers
//! exactly one sees a row come back. The balance credit runs in the same
//! transaction as that write.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::catalogue::CatalogueId;
use crate::domain::deposit::{Deposit, DepositDraft, DepositReview, DepositStatus};
use crate::domain::ports::{DepositRepository, DepositRepositoryError, DepositTransition};
use crate::domain::user::UserId;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{DepositRow, NewDepositRow};
use super::pool::{DbPool, PoolError};
use super::schema::{deposits, users};

/// Diesel-backed implementation of the deposit repository port.
#[derive(Clone)]
pub struct DieselDepositRepository {
    pool: DbPool,
}

impl DieselDepositRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> DepositRepositoryError {
    map_pool_error(error, |message| {
        DepositRepositoryError::connection(message)
    })
}

fn map_diesel(error: diesel::result::Error) -> DepositRepositoryError {
    map_diesel_error(
        error,
        DepositRepositoryError::query,
        DepositRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain deposit.
pub(super) fn row_to_deposit(row: DepositRow) -> Result<Deposit, DepositRepositoryError> {
    let status = row
        .status
        .parse::<DepositStatus>()
        .map_err(|err| DepositRepositoryError::query(format!("decode status: {err}")))?;

    let review = match row.admin_id {
        Some(admin_id) => Some(DepositReview {
            admin_id: UserId::from_uuid(admin_id),
            notes: row.admin_notes,
            processed_at: row.processed_at.ok_or_else(|| {
                DepositRepositoryError::query("resolved deposit is missing processed_at")
            })?,
        }),
        None => None,
    };

    Deposit::new(DepositDraft {
        id: row.id,
        user_id: UserId::from_uuid(row.user_id),
        waste_type_id: CatalogueId::new(row.waste_type_id)
            .map_err(|err| DepositRepositoryError::query(format!("decode waste type: {err}")))?,
        weight_kg: row.weight_kg,
        points_awarded: row.points_awarded,
        status,
        photo_ref: row.photo_ref,
        review,
        created_at: row.created_at,
    })
    .map_err(|err| DepositRepositoryError::query(err.to_string()))
}

/// Transaction-internal transition outcome, before domain conversion.
enum RawTransition {
    Applied(DepositRow),
    Resolved(String),
    Missing,
}

fn finish_transition(raw: RawTransition) -> Result<DepositTransition, DepositRepositoryError> {
    match raw {
        RawTransition::Applied(row) => Ok(DepositTransition::Applied(row_to_deposit(row)?)),
        RawTransition::Resolved(status) => {
            let status = status.parse::<DepositStatus>().map_err(|err| {
                DepositRepositoryError::query(format!("decode status: {err}"))
            })?;
            Ok(DepositTransition::AlreadyResolved(status))
        }
        RawTransition::Missing => Ok(DepositTransition::Missing),
    }
}

fn new_row(deposit: &Deposit) -> NewDepositRow<'_> {
    NewDepositRow {
        id: deposit.id(),
        user_id: *deposit.user_id().as_uuid(),
        waste_type_id: deposit.waste_type_id().as_ref(),
        weight_kg: deposit.weight_kg(),
        points_awarded: deposit.points_awarded(),
        status: deposit.status().as_str(),
        photo_ref: deposit.photo_ref(),
        created_at: deposit.created_at(),
    }
}

#[async_trait]
impl DepositRepository for DieselDepositRepository {
    async fn insert_pending(&self, deposit: &Deposit) -> Result<(), DepositRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        diesel::insert_into(deposits::table)
            .values(&new_row(deposit))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel)
    }

    async fn insert_approved_crediting(
        &self,
        deposit: &Deposit,
    ) -> Result<(), DepositRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let row = new_row(deposit);
        let owner = *deposit.user_id().as_uuid();
        let credit = deposit.points_awarded();

        conn.transaction::<(), diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(deposits::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                diesel::update(users::table.filter(users::id.eq(owner)))
                    .set(users::points.eq(users::points + credit))
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel)
    }

    async fn approve_crediting(
        &self,
        deposit_id: Uuid,
        review: DepositReview,
    ) -> Result<DepositTransition, DepositRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let admin_id = *review.admin_id.as_uuid();

        let raw = conn
            .transaction::<RawTransition, diesel::result::Error, _>(|conn| {
                async move {
                    let updated = diesel::update(
                        deposits::table.filter(
                            deposits::id
                                .eq(deposit_id)
                                .and(deposits::status.eq(DepositStatus::Pending.as_str())),
                        ),
                    )
                    .set((
                        deposits::status.eq(DepositStatus::Approved.as_str()),
                        deposits::admin_id.eq(Some(admin_id)),
                        deposits::admin_notes.eq(review.notes.clone()),
                        deposits::processed_at.eq(Some(review.processed_at)),
                    ))
                    .returning(DepositRow::as_returning())
                    .get_result::<DepositRow>(conn)
                    .await
                    .optional()?;

                    match updated {
                        Some(row) => {
                            diesel::update(users::table.filter(users::id.eq(row.user_id)))
                                .set(users::points.eq(users::points + row.points_awarded))
                                .execute(conn)
                                .await?;
                            Ok(RawTransition::Applied(row))
                        }
                        None => lost_race_outcome(conn, deposit_id).await,
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        finish_transition(raw)
    }

    async fn reject(
        &self,
        deposit_id: Uuid,
        review: DepositReview,
    ) -> Result<DepositTransition, DepositRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let admin_id = *review.admin_id.as_uuid();

        let raw = conn
            .transaction::<RawTransition, diesel::result::Error, _>(|conn| {
                async move {
                    let updated = diesel::update(
                        deposits::table.filter(
                            deposits::id
                                .eq(deposit_id)
                                .and(deposits::status.eq(DepositStatus::Pending.as_str())),
                        ),
                    )
                    .set((
                        deposits::status.eq(DepositStatus::Rejected.as_str()),
                        deposits::admin_id.eq(Some(admin_id)),
                        deposits::admin_notes.eq(review.notes.clone()),
                        deposits::processed_at.eq(Some(review.processed_at)),
                    ))
                    .returning(DepositRow::as_returning())
                    .get_result::<DepositRow>(conn)
                    .await
                    .optional()?;

                    match updated {
                        Some(row) => Ok(RawTransition::Applied(row)),
                        None => lost_race_outcome(conn, deposit_id).await,
                    }
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel)?;

        finish_transition(raw)
    }

    async fn find_by_id(
        &self,
        deposit_id: Uuid,
    ) -> Result<Option<Deposit>, DepositRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = deposits::table
            .filter(deposits::id.eq(deposit_id))
            .select(DepositRow::as_select())
            .first::<DepositRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_deposit).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Deposit>, DepositRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<DepositRow> = deposits::table
            .filter(deposits::user_id.eq(user_id.as_uuid()))
            .order((deposits::created_at.desc(), deposits::id.desc()))
            .select(DepositRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_deposit).collect()
    }

    async fn list_pending(&self) -> Result<Vec<Deposit>, DepositRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<DepositRow> = deposits::table
            .filter(deposits::status.eq(DepositStatus::Pending.as_str()))
            .order((deposits::created_at.desc(), deposits::id.desc()))
            .select(DepositRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_deposit).collect()
    }
}

/// Distinguish a missing record from a lost compare-and-swap.
async fn lost_race_outcome(
    conn: &mut diesel_async::AsyncPgConnection,
    deposit_id: Uuid,
) -> Result<RawTransition, diesel::result::Error> {
    let status: Option<String> = deposits::table
        .filter(deposits::id.eq(deposit_id))
        .select(deposits::status)
        .first(conn)
        .await
        .optional()?;
    Ok(match status {
        Some(status) => RawTransition::Resolved(status),
        None => RawTransition::Missing,
    })
}
