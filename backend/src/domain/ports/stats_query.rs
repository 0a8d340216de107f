//! Driving port for the admin dashboard aggregates.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::UserId;

use super::stats_repository::DashboardStats;

/// Use-case port for reading dashboard statistics.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsQuery: Send + Sync {
    /// Collect dashboard aggregates for the current platform-local day.
    /// The acting identity must resolve to an admin account.
    async fn dashboard_stats(&self, admin_id: UserId) -> Result<DashboardStats, Error>;
}
