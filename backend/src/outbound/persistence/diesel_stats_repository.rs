//! PostgreSQL-backed `StatsRepository` implementation using Diesel.
//!
//! Four independent aggregate reads; staleness between them is acceptable,
//! so no transaction wraps the collection.

use async_trait::async_trait;
use diesel::dsl::sum;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::deposit::DepositStatus;
use crate::domain::ports::{DashboardStats, DayWindow, StatsRepository, StatsRepositoryError};
use crate::domain::user::Role;

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::{deposits, users};

/// Diesel-backed implementation of the stats repository port.
#[derive(Clone)]
pub struct DieselStatsRepository {
    pool: DbPool,
}

impl DieselStatsRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> StatsRepositoryError {
    map_pool_error(error, |message| StatsRepositoryError::connection(message))
}

fn map_diesel(error: diesel::result::Error) -> StatsRepositoryError {
    map_diesel_error(
        error,
        StatsRepositoryError::query,
        StatsRepositoryError::connection,
    )
}

#[async_trait]
impl StatsRepository for DieselStatsRepository {
    async fn collect(&self, today: DayWindow) -> Result<DashboardStats, StatsRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let pending_deposits: i64 = deposits::table
            .filter(deposits::status.eq(DepositStatus::Pending.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let deposits_today: i64 = deposits::table
            .filter(
                deposits::created_at
                    .ge(today.start)
                    .and(deposits::created_at.lt(today.end)),
            )
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let registered_users: i64 = users::table
            .filter(users::role.eq(Role::User.as_str()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel)?;

        let approved_weight_kg: Option<f64> = deposits::table
            .filter(deposits::status.eq(DepositStatus::Approved.as_str()))
            .select(sum(deposits::weight_kg))
            .first(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(DashboardStats {
            pending_deposits,
            deposits_today,
            registered_users,
            approved_weight_kg: approved_weight_kg.unwrap_or(0.0),
        })
    }
}
