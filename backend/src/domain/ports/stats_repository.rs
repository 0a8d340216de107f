//! Port for dashboard aggregation reads.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by stats repository adapters.
    pub enum StatsRepositoryError {
        /// Repository connection could not be established.
        Connection => "stats repository connection failed: {message}",
        /// Query failed during execution.
        Query => "stats repository query failed: {message}",
    }
}

/// Half-open UTC window `[start, end)` representing one platform-local day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Aggregated dashboard figures.
///
/// Read-only and staleness tolerant: the four figures are independent reads
/// with no cross-field transactional guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardStats {
    /// Deposits currently awaiting review.
    pub pending_deposits: i64,
    /// Deposits created within the supplied day window.
    pub deposits_today: i64,
    /// Registered non-admin accounts.
    pub registered_users: i64,
    /// Total approved weight in kilograms.
    pub approved_weight_kg: f64,
}

/// Port for collecting dashboard aggregates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Collect the dashboard aggregates, counting "today" against the
    /// supplied window.
    async fn collect(&self, today: DayWindow) -> Result<DashboardStats, StatsRepositoryError>;
}
