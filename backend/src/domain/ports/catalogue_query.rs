//! Driving port for catalogue reads.

use async_trait::async_trait;

use crate::domain::catalogue::{RewardOption, WasteType};
use crate::domain::error::Error;

/// Use-case port for listing the active catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Active waste types, ordered by name.
    async fn waste_types(&self) -> Result<Vec<WasteType>, Error>;

    /// Active reward options, ordered by name.
    async fn reward_options(&self) -> Result<Vec<RewardOption>, Error>;
}
