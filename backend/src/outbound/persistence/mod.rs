//! Diesel persistence adapters for the driven ports.

mod diesel_catalogue_repository;
mod diesel_deposit_repository;
mod diesel_error_mapping;
mod diesel_redemption_repository;
mod diesel_stats_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
pub mod schema;

pub use diesel_catalogue_repository::DieselCatalogueRepository;
pub use diesel_deposit_repository::DieselDepositRepository;
pub use diesel_redemption_repository::DieselRedemptionRepository;
pub use diesel_stats_repository::DieselStatsRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
