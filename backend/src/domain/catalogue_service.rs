//! Catalogue reads for the deposit and rewards screens.

use std::sync::Arc;

use crate::domain::catalogue::{RewardOption, WasteType};
use crate::domain::error::Error;
use crate::domain::ports::{CatalogueQuery, CatalogueRepository};

use super::accrual_service::map_catalogue_repo_error;

/// Pass-through service implementing the catalogue driving port.
#[derive(Clone)]
pub struct CatalogueQueryService<C> {
    catalogue: Arc<C>,
}

impl<C> CatalogueQueryService<C> {
    /// Create the catalogue service.
    pub fn new(catalogue: Arc<C>) -> Self {
        Self { catalogue }
    }
}

#[async_trait::async_trait]
impl<C> CatalogueQuery for CatalogueQueryService<C>
where
    C: CatalogueRepository,
{
    async fn waste_types(&self) -> Result<Vec<WasteType>, Error> {
        self.catalogue
            .list_active_waste_types()
            .await
            .map_err(map_catalogue_repo_error)
    }

    async fn reward_options(&self) -> Result<Vec<RewardOption>, Error> {
        self.catalogue
            .list_active_reward_options()
            .await
            .map_err(map_catalogue_repo_error)
    }
}
