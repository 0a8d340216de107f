//! In-memory implementations of the driven ports.
//!
//! A single mutex guards the whole ledger, so every transition method is
//! atomic exactly like the SQL adapters' transactions: the status check and
//! the balance mutation happen under one critical section, and a lost
//! compare-and-swap surfaces as `AlreadyResolved` rather than a double
//! credit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use ecopoints_backend::domain::catalogue::{CatalogueId, RewardOption, WasteType};
use ecopoints_backend::domain::deposit::{
    Deposit, DepositDraft, DepositReview, DepositStatus,
};
use ecopoints_backend::domain::ports::{
    CatalogueRepository, CatalogueRepositoryError, DashboardStats, DayWindow, DepositRepository,
    DepositRepositoryError, DepositTransition, InsertUserOutcome, RedemptionRepository,
    RedemptionRepositoryError, RedemptionReservation, RedemptionTransition, StatsRepository,
    StatsRepositoryError, StoredCredentials, UserRepository, UserRepositoryError,
};
use ecopoints_backend::domain::redemption::{
    RedemptionDraft, RedemptionRequest, RedemptionResolution, RedemptionStatus,
};
use ecopoints_backend::domain::user::{EmailAddress, Role, User, UserDraft, UserId};

#[derive(Default)]
struct LedgerState {
    users: HashMap<Uuid, StoredUser>,
    deposits: HashMap<Uuid, Deposit>,
    redemptions: HashMap<Uuid, RedemptionRequest>,
    waste_types: HashMap<String, WasteType>,
    reward_options: HashMap<String, RewardOption>,
}

struct StoredUser {
    user: User,
    password_hash: String,
}

/// Shared in-memory ledger implementing every driven port.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    state: Arc<Mutex<LedgerState>>,
}

fn rebuild_user(user: &User, points: i64) -> User {
    User::new(UserDraft {
        id: user.id(),
        name: user.name().clone(),
        email: user.email().clone(),
        phone: user.phone().clone(),
        role: user.role(),
        points,
        created_at: user.created_at(),
    })
    .expect("rebuilt user stays valid")
}

fn rebuild_deposit(deposit: &Deposit, status: DepositStatus, review: Option<DepositReview>) -> Deposit {
    Deposit::new(DepositDraft {
        id: deposit.id(),
        user_id: deposit.user_id(),
        waste_type_id: deposit.waste_type_id().clone(),
        weight_kg: deposit.weight_kg(),
        points_awarded: deposit.points_awarded(),
        status,
        photo_ref: deposit.photo_ref().to_owned(),
        review,
        created_at: deposit.created_at(),
    })
    .expect("rebuilt deposit stays valid")
}

fn rebuild_redemption(
    request: &RedemptionRequest,
    status: RedemptionStatus,
    resolution: Option<RedemptionResolution>,
) -> RedemptionRequest {
    RedemptionRequest::new(RedemptionDraft {
        id: request.id(),
        user_id: request.user_id(),
        reward_option_id: request.reward_option_id().clone(),
        idr_amount: request.idr_amount(),
        points_used: request.points_used(),
        status,
        wallet_info: request.wallet_info().to_owned(),
        resolution,
        created_at: request.created_at(),
    })
    .expect("rebuilt redemption stays valid")
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().expect("ledger mutex not poisoned")
    }

    /// Seed an account directly, bypassing registration.
    pub fn seed_user(&self, user: &User) {
        self.lock().users.insert(
            *user.id().as_uuid(),
            StoredUser {
                user: user.clone(),
                password_hash: "$argon2id$seeded".to_owned(),
            },
        );
    }

    /// Seed a waste type.
    pub fn seed_waste_type(&self, waste_type: WasteType) {
        self.lock()
            .waste_types
            .insert(waste_type.id().to_string(), waste_type);
    }

    /// Seed a reward option.
    pub fn seed_reward_option(&self, option: RewardOption) {
        self.lock()
            .reward_options
            .insert(option.id().to_string(), option);
    }

    /// Current balance of an account.
    pub fn balance_of(&self, user_id: UserId) -> i64 {
        self.lock()
            .users
            .get(user_id.as_uuid())
            .map(|stored| stored.user.points())
            .expect("seeded user exists")
    }

    /// Reconcile an account against the ledger invariant: balance equals the
    /// sum of approved deposits' awarded points minus the points reserved by
    /// non-failed redemptions.
    pub fn assert_reconciled(&self, user_id: UserId) {
        let state = self.lock();
        let credited: i64 = state
            .deposits
            .values()
            .filter(|d| d.user_id() == user_id && d.status() == DepositStatus::Approved)
            .map(Deposit::points_awarded)
            .sum();
        let reserved: i64 = state
            .redemptions
            .values()
            .filter(|r| r.user_id() == user_id && r.status() != RedemptionStatus::Failed)
            .map(RedemptionRequest::points_used)
            .sum();
        let balance = state
            .users
            .get(user_id.as_uuid())
            .map(|stored| stored.user.points())
            .expect("seeded user exists");
        assert_eq!(
            balance,
            credited - reserved,
            "balance diverged from the ledger"
        );
    }
}

#[async_trait]
impl UserRepository for InMemoryLedger {
    async fn insert(
        &self,
        user: &User,
        password_hash: &str,
    ) -> Result<InsertUserOutcome, UserRepositoryError> {
        let mut state = self.lock();
        let duplicate = state
            .users
            .values()
            .any(|stored| stored.user.email() == user.email());
        if duplicate {
            return Ok(InsertUserOutcome::DuplicateEmail);
        }
        state.users.insert(
            *user.id().as_uuid(),
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_owned(),
            },
        );
        Ok(InsertUserOutcome::Inserted)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .get(id.as_uuid())
            .map(|stored| stored.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserRepositoryError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|stored| stored.user.email() == email)
            .map(|stored| StoredCredentials {
                user: stored.user.clone(),
                password_hash: stored.password_hash.clone(),
            }))
    }
}

#[async_trait]
impl DepositRepository for InMemoryLedger {
    async fn insert_pending(&self, deposit: &Deposit) -> Result<(), DepositRepositoryError> {
        self.lock().deposits.insert(deposit.id(), deposit.clone());
        Ok(())
    }

    async fn insert_approved_crediting(
        &self,
        deposit: &Deposit,
    ) -> Result<(), DepositRepositoryError> {
        let mut state = self.lock();
        let owner = *deposit.user_id().as_uuid();
        let stored = state
            .users
            .get_mut(&owner)
            .ok_or_else(|| DepositRepositoryError::query("owner missing"))?;
        stored.user = rebuild_user(&stored.user, stored.user.points() + deposit.points_awarded());
        state.deposits.insert(deposit.id(), deposit.clone());
        Ok(())
    }

    async fn approve_crediting(
        &self,
        deposit_id: Uuid,
        review: DepositReview,
    ) -> Result<DepositTransition, DepositRepositoryError> {
        let mut state = self.lock();
        let Some(existing) = state.deposits.get(&deposit_id).cloned() else {
            return Ok(DepositTransition::Missing);
        };
        if existing.status() != DepositStatus::Pending {
            return Ok(DepositTransition::AlreadyResolved(existing.status()));
        }

        let approved = rebuild_deposit(&existing, DepositStatus::Approved, Some(review));
        let owner = *existing.user_id().as_uuid();
        let stored = state
            .users
            .get_mut(&owner)
            .ok_or_else(|| DepositRepositoryError::query("owner missing"))?;
        stored.user = rebuild_user(&stored.user, stored.user.points() + existing.points_awarded());
        state.deposits.insert(deposit_id, approved.clone());
        Ok(DepositTransition::Applied(approved))
    }

    async fn reject(
        &self,
        deposit_id: Uuid,
        review: DepositReview,
    ) -> Result<DepositTransition, DepositRepositoryError> {
        let mut state = self.lock();
        let Some(existing) = state.deposits.get(&deposit_id).cloned() else {
            return Ok(DepositTransition::Missing);
        };
        if existing.status() != DepositStatus::Pending {
            return Ok(DepositTransition::AlreadyResolved(existing.status()));
        }

        let rejected = rebuild_deposit(&existing, DepositStatus::Rejected, Some(review));
        state.deposits.insert(deposit_id, rejected.clone());
        Ok(DepositTransition::Applied(rejected))
    }

    async fn find_by_id(
        &self,
        deposit_id: Uuid,
    ) -> Result<Option<Deposit>, DepositRepositoryError> {
        Ok(self.lock().deposits.get(&deposit_id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<Deposit>, DepositRepositoryError> {
        let mut deposits: Vec<Deposit> = self
            .lock()
            .deposits
            .values()
            .filter(|d| d.user_id() == user_id)
            .cloned()
            .collect();
        deposits.sort_by_key(|d| std::cmp::Reverse(d.created_at()));
        Ok(deposits)
    }

    async fn list_pending(&self) -> Result<Vec<Deposit>, DepositRepositoryError> {
        let mut deposits: Vec<Deposit> = self
            .lock()
            .deposits
            .values()
            .filter(|d| d.status() == DepositStatus::Pending)
            .cloned()
            .collect();
        deposits.sort_by_key(|d| std::cmp::Reverse(d.created_at()));
        Ok(deposits)
    }
}

#[async_trait]
impl RedemptionRepository for InMemoryLedger {
    async fn insert_reserving(
        &self,
        request: &RedemptionRequest,
    ) -> Result<RedemptionReservation, RedemptionRepositoryError> {
        let mut state = self.lock();
        let owner = *request.user_id().as_uuid();
        let Some(stored) = state.users.get_mut(&owner) else {
            return Ok(RedemptionReservation::MissingUser);
        };
        let balance = stored.user.points();
        if balance < request.points_used() {
            return Ok(RedemptionReservation::InsufficientBalance { balance });
        }
        stored.user = rebuild_user(&stored.user, balance - request.points_used());
        state.redemptions.insert(request.id(), request.clone());
        Ok(RedemptionReservation::Reserved)
    }

    async fn complete(
        &self,
        request_id: Uuid,
        resolution: RedemptionResolution,
    ) -> Result<RedemptionTransition, RedemptionRepositoryError> {
        let mut state = self.lock();
        let Some(existing) = state.redemptions.get(&request_id).cloned() else {
            return Ok(RedemptionTransition::Missing);
        };
        if existing.status() != RedemptionStatus::Pending {
            return Ok(RedemptionTransition::AlreadyResolved(existing.status()));
        }

        let completed =
            rebuild_redemption(&existing, RedemptionStatus::Completed, Some(resolution));
        state.redemptions.insert(request_id, completed.clone());
        Ok(RedemptionTransition::Applied(completed))
    }

    async fn fail_refunding(
        &self,
        request_id: Uuid,
        resolution: RedemptionResolution,
    ) -> Result<RedemptionTransition, RedemptionRepositoryError> {
        let mut state = self.lock();
        let Some(existing) = state.redemptions.get(&request_id).cloned() else {
            return Ok(RedemptionTransition::Missing);
        };
        if existing.status() != RedemptionStatus::Pending {
            return Ok(RedemptionTransition::AlreadyResolved(existing.status()));
        }

        let failed = rebuild_redemption(&existing, RedemptionStatus::Failed, Some(resolution));
        let owner = *existing.user_id().as_uuid();
        let stored = state
            .users
            .get_mut(&owner)
            .ok_or_else(|| RedemptionRepositoryError::query("owner missing"))?;
        stored.user = rebuild_user(&stored.user, stored.user.points() + existing.points_used());
        state.redemptions.insert(request_id, failed.clone());
        Ok(RedemptionTransition::Applied(failed))
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<RedemptionRequest>, RedemptionRepositoryError> {
        let mut requests: Vec<RedemptionRequest> = self
            .lock()
            .redemptions
            .values()
            .filter(|r| r.user_id() == user_id)
            .cloned()
            .collect();
        requests.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        Ok(requests)
    }

    async fn list_pending(&self) -> Result<Vec<RedemptionRequest>, RedemptionRepositoryError> {
        let mut requests: Vec<RedemptionRequest> = self
            .lock()
            .redemptions
            .values()
            .filter(|r| r.status() == RedemptionStatus::Pending)
            .cloned()
            .collect();
        requests.sort_by_key(|r| std::cmp::Reverse(r.created_at()));
        Ok(requests)
    }
}

#[async_trait]
impl CatalogueRepository for InMemoryLedger {
    async fn find_waste_type(
        &self,
        id: &CatalogueId,
    ) -> Result<Option<WasteType>, CatalogueRepositoryError> {
        Ok(self.lock().waste_types.get(id.as_ref()).cloned())
    }

    async fn find_reward_option(
        &self,
        id: &CatalogueId,
    ) -> Result<Option<RewardOption>, CatalogueRepositoryError> {
        Ok(self.lock().reward_options.get(id.as_ref()).cloned())
    }

    async fn list_active_waste_types(&self) -> Result<Vec<WasteType>, CatalogueRepositoryError> {
        let mut waste_types: Vec<WasteType> = self
            .lock()
            .waste_types
            .values()
            .filter(|w| w.is_active())
            .cloned()
            .collect();
        waste_types.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(waste_types)
    }

    async fn list_active_reward_options(
        &self,
    ) -> Result<Vec<RewardOption>, CatalogueRepositoryError> {
        let mut options: Vec<RewardOption> = self
            .lock()
            .reward_options
            .values()
            .filter(|o| o.is_active())
            .cloned()
            .collect();
        options.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(options)
    }
}

#[async_trait]
impl StatsRepository for InMemoryLedger {
    async fn collect(&self, today: DayWindow) -> Result<DashboardStats, StatsRepositoryError> {
        let state = self.lock();
        Ok(DashboardStats {
            pending_deposits: state
                .deposits
                .values()
                .filter(|d| d.status() == DepositStatus::Pending)
                .count() as i64,
            deposits_today: state
                .deposits
                .values()
                .filter(|d| d.created_at() >= today.start && d.created_at() < today.end)
                .count() as i64,
            registered_users: state
                .users
                .values()
                .filter(|stored| stored.user.role() == Role::User)
                .count() as i64,
            approved_weight_kg: state
                .deposits
                .values()
                .filter(|d| d.status() == DepositStatus::Approved)
                .map(Deposit::weight_kg)
                .sum(),
        })
    }
}
