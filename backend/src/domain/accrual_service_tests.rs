//! Tests for the accrual engine.

use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::catalogue::{CatalogueId, WasteType};
use crate::domain::ports::{
    MockCatalogueRepository, MockDepositRepository, MockUserRepository, UserRepositoryError,
};
use crate::domain::user::{DisplayName, EmailAddress, PhoneNumber, Role, User, UserDraft, UserId};

fn sample_user(id: UserId) -> User {
    User::new(UserDraft {
        id,
        name: DisplayName::new("Siti Rahma").expect("valid name"),
        email: EmailAddress::new("siti@example.com").expect("valid email"),
        phone: PhoneNumber::new("+62-812-0000-0000").expect("valid phone"),
        role: Role::User,
        points: 0,
        created_at: Utc::now(),
    })
    .expect("valid user")
}

fn bottles(points_per_kg: i64, is_active: bool) -> WasteType {
    WasteType::new(
        CatalogueId::new("bottles").expect("valid slug"),
        "Plastic Bottles",
        points_per_kg,
        is_active,
    )
    .expect("valid waste type")
}

fn sample_request(user_id: UserId) -> SubmitDepositRequest {
    SubmitDepositRequest {
        user_id,
        waste_type_id: CatalogueId::new("bottles").expect("valid slug"),
        weight_kg: 2.0,
        photo_ref: "photos/abc.jpg".to_owned(),
    }
}

fn service(
    deposits: MockDepositRepository,
    users: MockUserRepository,
    catalogue: MockCatalogueRepository,
    policy: AccrualPolicy,
) -> DepositCommandService<MockDepositRepository, MockUserRepository, MockCatalogueRepository> {
    DepositCommandService::new(
        Arc::new(deposits),
        Arc::new(users),
        Arc::new(catalogue),
        Arc::new(DefaultClock),
        policy,
        DepositLimits::default(),
    )
}

#[tokio::test]
async fn review_required_creates_pending_deposit_with_priced_points() {
    let user_id = UserId::random();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(sample_user(id))));

    let mut catalogue = MockCatalogueRepository::new();
    catalogue
        .expect_find_waste_type()
        .return_once(|_| Ok(Some(bottles(50, true))));

    let mut deposits = MockDepositRepository::new();
    deposits
        .expect_insert_pending()
        .times(1)
        .return_once(|_| Ok(()));
    deposits.expect_insert_approved_crediting().times(0);

    let service = service(deposits, users, catalogue, AccrualPolicy::ReviewRequired);
    let deposit = service
        .submit_deposit(sample_request(user_id))
        .await
        .expect("submission succeeds");

    assert_eq!(deposit.status(), DepositStatus::Pending);
    assert_eq!(deposit.points_awarded(), 100);
    assert!(deposit.review().is_none());
}

#[tokio::test]
async fn auto_approve_inserts_credited_approved_deposit() {
    let user_id = UserId::random();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(sample_user(id))));

    let mut catalogue = MockCatalogueRepository::new();
    catalogue
        .expect_find_waste_type()
        .return_once(|_| Ok(Some(bottles(50, true))));

    let mut deposits = MockDepositRepository::new();
    deposits.expect_insert_pending().times(0);
    deposits
        .expect_insert_approved_crediting()
        .times(1)
        .return_once(|_| Ok(()));

    let service = service(deposits, users, catalogue, AccrualPolicy::AutoApprove);
    let deposit = service
        .submit_deposit(sample_request(user_id))
        .await
        .expect("submission succeeds");

    assert_eq!(deposit.status(), DepositStatus::Approved);
    assert_eq!(deposit.points_awarded(), 100);
}

#[rstest]
#[case(0.0)]
#[case(-2.5)]
#[case(100.5)]
#[tokio::test]
async fn out_of_bounds_weight_is_rejected_before_any_io(#[case] weight: f64) {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().times(0);
    let mut catalogue = MockCatalogueRepository::new();
    catalogue.expect_find_waste_type().times(0);
    let mut deposits = MockDepositRepository::new();
    deposits.expect_insert_pending().times(0);

    let service = service(deposits, users, catalogue, AccrualPolicy::ReviewRequired);
    let mut request = sample_request(UserId::random());
    request.weight_kg = weight;

    let error = service
        .submit_deposit(request)
        .await
        .expect_err("invalid weight");
    assert_eq!(error.code, ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn inactive_waste_type_maps_to_not_found() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(sample_user(id))));

    let mut catalogue = MockCatalogueRepository::new();
    catalogue
        .expect_find_waste_type()
        .return_once(|_| Ok(Some(bottles(50, false))));

    let mut deposits = MockDepositRepository::new();
    deposits.expect_insert_pending().times(0);

    let service = service(deposits, users, catalogue, AccrualPolicy::ReviewRequired);
    let error = service
        .submit_deposit(sample_request(UserId::random()))
        .await
        .expect_err("inactive type");
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn unknown_user_maps_to_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));
    let catalogue = MockCatalogueRepository::new();
    let deposits = MockDepositRepository::new();

    let service = service(deposits, users, catalogue, AccrualPolicy::ReviewRequired);
    let error = service
        .submit_deposit(sample_request(UserId::random()))
        .await
        .expect_err("unknown user");
    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn repository_connection_failure_maps_to_service_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(|_| Err(UserRepositoryError::connection("pool exhausted")));
    let catalogue = MockCatalogueRepository::new();
    let deposits = MockDepositRepository::new();

    let service = service(deposits, users, catalogue, AccrualPolicy::ReviewRequired);
    let error = service
        .submit_deposit(sample_request(UserId::random()))
        .await
        .expect_err("store outage");
    assert_eq!(error.code, ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn fractional_weight_rounds_half_up() {
    let user_id = UserId::random();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |id| Ok(Some(sample_user(id))));

    let mut catalogue = MockCatalogueRepository::new();
    catalogue
        .expect_find_waste_type()
        .return_once(|_| Ok(Some(bottles(50, true))));

    let mut deposits = MockDepositRepository::new();
    deposits.expect_insert_pending().return_once(|_| Ok(()));

    let service = service(deposits, users, catalogue, AccrualPolicy::ReviewRequired);
    let mut request = sample_request(user_id);
    request.weight_kg = 0.05; // 2.5 points

    let deposit = service
        .submit_deposit(request)
        .await
        .expect("submission succeeds");
    assert_eq!(deposit.points_awarded(), 3);
}
