//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so they stay testable with mocked use-cases.

use std::sync::Arc;

use crate::domain::ports::{
    AccountService, CatalogueQuery, DepositCommand, LedgerQuery, RedemptionCommand, ReviewCommand,
    StatsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountService>,
    pub deposits: Arc<dyn DepositCommand>,
    pub redemptions: Arc<dyn RedemptionCommand>,
    pub review: Arc<dyn ReviewCommand>,
    pub ledger: Arc<dyn LedgerQuery>,
    pub stats: Arc<dyn StatsQuery>,
    pub catalogue: Arc<dyn CatalogueQuery>,
}
