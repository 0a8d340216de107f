//! Tests for the admin review handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::domain::catalogue::CatalogueId;
use crate::domain::deposit::{Deposit, DepositDraft, DepositReview, DepositStatus};
use crate::domain::ports::DashboardStats;
use crate::domain::user::UserId;
use crate::inbound::http::test_utils::{
    MockPorts, session_cookie_for, test_login_route, test_session_middleware,
};

fn approved_deposit(admin_id: UserId) -> Deposit {
    Deposit::new(DepositDraft {
        id: Uuid::new_v4(),
        user_id: UserId::random(),
        waste_type_id: CatalogueId::new("cans").expect("valid slug"),
        weight_kg: 1.5,
        points_awarded: 120,
        status: DepositStatus::Approved,
        photo_ref: "photos/def.jpg".to_owned(),
        review: Some(DepositReview {
            admin_id,
            notes: None,
            processed_at: Utc::now(),
        }),
        created_at: Utc::now(),
    })
    .expect("valid deposit")
}

async fn app_with(
    ports: MockPorts,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(ports.into_state()))
            .wrap(test_session_middleware())
            .route("/__test/login/{id}", test_login_route())
            .service(
                web::scope("/api/v1")
                    .service(list_pending_deposits)
                    .service(approve_deposit)
                    .service(reject_deposit)
                    .service(list_pending_redemptions)
                    .service(complete_redemption)
                    .service(fail_redemption)
                    .service(admin_stats),
            ),
    )
    .await
}

#[actix_web::test]
async fn approve_passes_the_session_identity_as_admin() {
    let admin_id = UserId::random();
    let deposit_id = Uuid::new_v4();

    let mut ports = MockPorts::default();
    ports
        .review
        .expect_approve_deposit()
        .times(1)
        .return_once(move |action| {
            assert_eq!(action.admin_id, admin_id);
            assert_eq!(action.record_id, deposit_id);
            Ok(approved_deposit(admin_id))
        });

    let app = app_with(ports).await;
    let cookie = session_cookie_for(&app, admin_id).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/admin/deposits/{deposit_id}/approve"))
            .cookie(cookie)
            .set_json(json!({ "notes": null }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "approved");
}

#[actix_web::test]
async fn double_approval_surfaces_as_conflict() {
    let admin_id = UserId::random();

    let mut ports = MockPorts::default();
    ports
        .review
        .expect_approve_deposit()
        .return_once(|_| Err(crate::domain::Error::conflict("deposit already approved")));

    let app = app_with(ports).await;
    let cookie = session_cookie_for(&app, admin_id).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&format!("/api/v1/admin/deposits/{}/approve", Uuid::new_v4()))
            .cookie(cookie)
            .set_json(json!({}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn malformed_record_id_is_a_bad_request() {
    let admin_id = UserId::random();

    let mut ports = MockPorts::default();
    ports.review.expect_approve_deposit().times(0);

    let app = app_with(ports).await;
    let cookie = session_cookie_for(&app, admin_id).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/admin/deposits/not-a-uuid/approve")
            .cookie(cookie)
            .set_json(json!({}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn stats_use_the_wire_field_names() {
    let admin_id = UserId::random();

    let mut ports = MockPorts::default();
    ports.stats.expect_dashboard_stats().return_once(|_| {
        Ok(DashboardStats {
            pending_deposits: 3,
            deposits_today: 5,
            registered_users: 12,
            approved_weight_kg: 42.5,
        })
    });

    let app = app_with(ports).await;
    let cookie = session_cookie_for(&app, admin_id).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/admin/stats")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["pendingCount"], 3);
    assert_eq!(body["todayDeposits"], 5);
    assert_eq!(body["totalUsers"], 12);
    assert_eq!(body["totalWeight"], 42.5);
}

#[actix_web::test]
async fn non_admin_identity_is_forbidden() {
    let user_id = UserId::random();

    let mut ports = MockPorts::default();
    ports
        .review
        .expect_list_pending_deposits()
        .return_once(|_| Err(crate::domain::Error::forbidden("admin account required")));

    let app = app_with(ports).await;
    let cookie = session_cookie_for(&app, user_id).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/admin/deposits/pending")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}
