//! Ledger domain: entities, services, and hexagonal ports.
//!
//! Entities are validated at construction and immutable afterwards; all state
//! transitions flow through the services in this module, which in turn rely
//! on the compare-and-swap contracts of the driven ports for exclusivity.

pub mod accrual_service;
pub mod account_service;
pub mod catalogue;
pub mod catalogue_service;
pub mod deposit;
pub mod error;
pub mod ledger_service;
pub mod points;
pub mod policy;
pub mod ports;
pub mod redemption;
pub mod redemption_service;
pub mod review_service;
pub mod stats_service;
pub mod user;

pub use self::accrual_service::DepositCommandService;
pub use self::account_service::AccountServiceImpl;
pub use self::catalogue::{CatalogueId, CatalogueValidationError, RewardOption, WasteType};
pub use self::catalogue_service::CatalogueQueryService;
pub use self::deposit::{
    Deposit, DepositDraft, DepositReview, DepositStatus, DepositValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::ledger_service::LedgerQueryService;
pub use self::points::{points_for_payout, points_for_weight};
pub use self::policy::{AccrualPolicy, DepositLimits, PlatformRates};
pub use self::redemption::{
    RedemptionDraft, RedemptionRequest, RedemptionResolution, RedemptionStatus,
    RedemptionValidationError,
};
pub use self::redemption_service::RedemptionCommandService;
pub use self::review_service::ReviewService;
pub use self::stats_service::StatsQueryService;
pub use self::user::{
    DisplayName, EmailAddress, PhoneNumber, Role, User, UserDraft, UserId, UserValidationError,
};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
