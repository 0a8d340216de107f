//! Tests for the review service.

use std::sync::Arc;

use chrono::Utc;
use mockable::DefaultClock;
use uuid::Uuid;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::catalogue::CatalogueId;
use crate::domain::deposit::{DepositDraft, DepositStatus};
use crate::domain::ports::{
    MockDepositRepository, MockRedemptionRepository, MockUserRepository,
};
use crate::domain::redemption::{RedemptionDraft, RedemptionStatus};
use crate::domain::user::{DisplayName, EmailAddress, PhoneNumber, Role, UserDraft};

fn account(id: UserId, role: Role) -> User {
    User::new(UserDraft {
        id,
        name: DisplayName::new("Pak Budi").expect("valid name"),
        email: EmailAddress::new("budi@example.com").expect("valid email"),
        phone: PhoneNumber::new("+62-813-1111-2222").expect("valid phone"),
        role,
        points: 0,
        created_at: Utc::now(),
    })
    .expect("valid user")
}

fn approved_deposit(review: DepositReview) -> Deposit {
    Deposit::new(DepositDraft {
        id: Uuid::new_v4(),
        user_id: UserId::random(),
        waste_type_id: CatalogueId::new("cans").expect("valid slug"),
        weight_kg: 1.5,
        points_awarded: 120,
        status: DepositStatus::Approved,
        photo_ref: "photos/def.jpg".to_owned(),
        review: Some(review),
        created_at: Utc::now(),
    })
    .expect("valid deposit")
}

fn failed_redemption(resolution: RedemptionResolution) -> RedemptionRequest {
    RedemptionRequest::new(RedemptionDraft {
        id: Uuid::new_v4(),
        user_id: UserId::random(),
        reward_option_id: CatalogueId::new("gopay").expect("valid slug"),
        idr_amount: 1000,
        points_used: 100,
        status: RedemptionStatus::Failed,
        wallet_info: "gopay: 0812".to_owned(),
        resolution: Some(resolution),
        created_at: Utc::now(),
    })
    .expect("valid redemption")
}

fn service(
    deposits: MockDepositRepository,
    redemptions: MockRedemptionRepository,
    users: MockUserRepository,
) -> ReviewService<MockDepositRepository, MockRedemptionRepository, MockUserRepository> {
    ReviewService::new(
        Arc::new(deposits),
        Arc::new(redemptions),
        Arc::new(users),
        Arc::new(DefaultClock),
    )
}

fn admin_users() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|id| Ok(Some(account(id, Role::Admin))));
    users
}

#[tokio::test]
async fn approve_applies_transition_and_returns_record() {
    let admin_id = UserId::random();

    let mut deposits = MockDepositRepository::new();
    deposits
        .expect_approve_crediting()
        .times(1)
        .return_once(|_, review| Ok(DepositTransition::Applied(approved_deposit(review))));

    let service = service(deposits, MockRedemptionRepository::new(), admin_users());
    let deposit = service
        .approve_deposit(ApproveAction {
            record_id: Uuid::new_v4(),
            admin_id,
            notes: Some("looks good".to_owned()),
        })
        .await
        .expect("approval succeeds");

    assert_eq!(deposit.status(), DepositStatus::Approved);
    let review = deposit.review().expect("review recorded");
    assert_eq!(review.admin_id, admin_id);
}

#[tokio::test]
async fn approve_on_resolved_record_is_a_conflict() {
    let admin_id = UserId::random();

    let mut deposits = MockDepositRepository::new();
    deposits
        .expect_approve_crediting()
        .return_once(|_, _| Ok(DepositTransition::AlreadyResolved(DepositStatus::Approved)));

    let service = service(deposits, MockRedemptionRepository::new(), admin_users());
    let error = service
        .approve_deposit(ApproveAction {
            record_id: Uuid::new_v4(),
            admin_id,
            notes: None,
        })
        .await
        .expect_err("duplicate approval");

    assert_eq!(error.code, ErrorCode::Conflict);
}

#[tokio::test]
async fn approve_on_missing_record_is_not_found() {
    let admin_id = UserId::random();

    let mut deposits = MockDepositRepository::new();
    deposits
        .expect_approve_crediting()
        .return_once(|_, _| Ok(DepositTransition::Missing));

    let service = service(deposits, MockRedemptionRepository::new(), admin_users());
    let error = service
        .approve_deposit(ApproveAction {
            record_id: Uuid::new_v4(),
            admin_id,
            notes: None,
        })
        .await
        .expect_err("missing record");

    assert_eq!(error.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn non_admin_caller_is_forbidden_before_any_transition() {
    let admin_id = UserId::random();

    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(move |id| Ok(Some(account(id, Role::User))));

    let mut deposits = MockDepositRepository::new();
    deposits.expect_approve_crediting().times(0);

    let service = service(deposits, MockRedemptionRepository::new(), users);
    let error = service
        .approve_deposit(ApproveAction {
            record_id: Uuid::new_v4(),
            admin_id,
            notes: None,
        })
        .await
        .expect_err("forbidden");

    assert_eq!(error.code, ErrorCode::Forbidden);
}

#[tokio::test]
async fn reject_requires_a_reason() {
    let admin_id = UserId::random();

    let mut deposits = MockDepositRepository::new();
    deposits.expect_reject().times(0);

    let service = service(deposits, MockRedemptionRepository::new(), admin_users());
    let error = service
        .reject_deposit(RejectAction {
            record_id: Uuid::new_v4(),
            admin_id,
            reason: "   ".to_owned(),
        })
        .await
        .expect_err("reason required");

    assert_eq!(error.code, ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn fail_redemption_passes_reason_into_resolution_notes() {
    let admin_id = UserId::random();

    let mut redemptions = MockRedemptionRepository::new();
    redemptions
        .expect_fail_refunding()
        .times(1)
        .return_once(|_, resolution| {
            assert_eq!(resolution.notes.as_deref(), Some("bank reject"));
            Ok(RedemptionTransition::Applied(failed_redemption(resolution)))
        });

    let service = service(MockDepositRepository::new(), redemptions, admin_users());
    let request = service
        .fail_redemption(RejectAction {
            record_id: Uuid::new_v4(),
            admin_id,
            reason: "bank reject".to_owned(),
        })
        .await
        .expect("failure applies");

    assert_eq!(request.status(), RedemptionStatus::Failed);
}

#[tokio::test]
async fn complete_on_resolved_redemption_is_a_conflict() {
    let admin_id = UserId::random();

    let mut redemptions = MockRedemptionRepository::new();
    redemptions.expect_complete().return_once(|_, _| {
        Ok(RedemptionTransition::AlreadyResolved(
            RedemptionStatus::Completed,
        ))
    });

    let service = service(MockDepositRepository::new(), redemptions, admin_users());
    let error = service
        .complete_redemption(ApproveAction {
            record_id: Uuid::new_v4(),
            admin_id,
            notes: None,
        })
        .await
        .expect_err("duplicate completion");

    assert_eq!(error.code, ErrorCode::Conflict);
}
