//! Port for reference catalogue reads.

use async_trait::async_trait;

use crate::domain::catalogue::{CatalogueId, RewardOption, WasteType};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by catalogue repository adapters.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection => "catalogue repository connection failed: {message}",
        /// Query failed during execution.
        Query => "catalogue repository query failed: {message}",
    }
}

/// Port for reading waste types and reward options.
///
/// Lookups return inactive entries too; callers decide whether inactivity is
/// an error (the engines treat inactive entries as absent).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// Fetch a waste type by identifier.
    async fn find_waste_type(
        &self,
        id: &CatalogueId,
    ) -> Result<Option<WasteType>, CatalogueRepositoryError>;

    /// Fetch a reward option by identifier.
    async fn find_reward_option(
        &self,
        id: &CatalogueId,
    ) -> Result<Option<RewardOption>, CatalogueRepositoryError>;

    /// List active waste types, ordered by name.
    async fn list_active_waste_types(&self) -> Result<Vec<WasteType>, CatalogueRepositoryError>;

    /// List active reward options, ordered by name.
    async fn list_active_reward_options(
        &self,
    ) -> Result<Vec<RewardOption>, CatalogueRepositoryError>;
}
