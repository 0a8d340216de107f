//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher) are implemented under `outbound`;
//! driving ports (use-cases) are implemented by the services in `domain` and
//! consumed by the inbound HTTP adapter.

mod macros;
pub(crate) use macros::define_port_error;

mod account;
mod catalogue_query;
mod catalogue_repository;
mod deposit_command;
mod deposit_repository;
mod ledger_query;
mod password_hasher;
mod redemption_command;
mod redemption_repository;
mod review_command;
mod stats_query;
mod stats_repository;
mod user_repository;

#[cfg(test)]
pub use account::MockAccountService;
pub use account::{AccountService, LoginRequest, RegisterAccountRequest};
#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
#[cfg(test)]
pub use deposit_command::MockDepositCommand;
pub use deposit_command::{DepositCommand, SubmitDepositRequest};
#[cfg(test)]
pub use deposit_repository::MockDepositRepository;
pub use deposit_repository::{DepositRepository, DepositRepositoryError, DepositTransition};
#[cfg(test)]
pub use ledger_query::MockLedgerQuery;
pub use ledger_query::LedgerQuery;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use redemption_command::MockRedemptionCommand;
pub use redemption_command::{RedemptionCommand, RequestRedemptionRequest};
#[cfg(test)]
pub use redemption_repository::MockRedemptionRepository;
pub use redemption_repository::{
    RedemptionRepository, RedemptionRepositoryError, RedemptionReservation, RedemptionTransition,
};
#[cfg(test)]
pub use review_command::MockReviewCommand;
pub use review_command::{ApproveAction, RejectAction, ReviewCommand};
#[cfg(test)]
pub use stats_query::MockStatsQuery;
pub use stats_query::StatsQuery;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
pub use stats_repository::{DashboardStats, DayWindow, StatsRepository, StatsRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{
    InsertUserOutcome, StoredCredentials, UserRepository, UserRepositoryError,
};
