//! PostgreSQL-backed `CatalogueRepository` implementation using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::catalogue::{CatalogueId, RewardOption, WasteType};
use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{RewardOptionRow, WasteTypeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{reward_options, waste_types};

/// Diesel-backed implementation of the catalogue repository port.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool(error: PoolError) -> CatalogueRepositoryError {
    map_pool_error(error, |message| {
        CatalogueRepositoryError::connection(message)
    })
}

fn map_diesel(error: diesel::result::Error) -> CatalogueRepositoryError {
    map_diesel_error(
        error,
        CatalogueRepositoryError::query,
        CatalogueRepositoryError::connection,
    )
}

fn row_to_waste_type(row: WasteTypeRow) -> Result<WasteType, CatalogueRepositoryError> {
    let id = CatalogueId::new(row.id)
        .map_err(|err| CatalogueRepositoryError::query(format!("decode waste type id: {err}")))?;
    WasteType::new(id, row.name, row.points_per_kg, row.is_active)
        .map_err(|err| CatalogueRepositoryError::query(err.to_string()))
}

fn row_to_reward_option(row: RewardOptionRow) -> Result<RewardOption, CatalogueRepositoryError> {
    let id = CatalogueId::new(row.id).map_err(|err| {
        CatalogueRepositoryError::query(format!("decode reward option id: {err}"))
    })?;
    RewardOption::new(
        id,
        row.name,
        row.min_points_to_redeem,
        row.rate,
        row.is_active,
    )
    .map_err(|err| CatalogueRepositoryError::query(err.to_string()))
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn find_waste_type(
        &self,
        id: &CatalogueId,
    ) -> Result<Option<WasteType>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = waste_types::table
            .filter(waste_types::id.eq(id.as_ref()))
            .select(WasteTypeRow::as_select())
            .first::<WasteTypeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_waste_type).transpose()
    }

    async fn find_reward_option(
        &self,
        id: &CatalogueId,
    ) -> Result<Option<RewardOption>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = reward_options::table
            .filter(reward_options::id.eq(id.as_ref()))
            .select(RewardOptionRow::as_select())
            .first::<RewardOptionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_reward_option).transpose()
    }

    async fn list_active_waste_types(&self) -> Result<Vec<WasteType>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<WasteTypeRow> = waste_types::table
            .filter(waste_types::is_active.eq(true))
            .order(waste_types::name.asc())
            .select(WasteTypeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_waste_type).collect()
    }

    async fn list_active_reward_options(
        &self,
    ) -> Result<Vec<RewardOption>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<RewardOptionRow> = reward_options::table
            .filter(reward_options::is_active.eq(true))
            .order(reward_options::name.asc())
            .select(RewardOptionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_reward_option).collect()
    }
}
