//! Tests for the deposit handlers.

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use super::*;
use crate::domain::catalogue::CatalogueId;
use crate::domain::deposit::{Deposit, DepositDraft, DepositStatus};
use crate::domain::user::UserId;
use crate::inbound::http::test_utils::{
    MockPorts, session_cookie_for, test_login_route, test_session_middleware,
};

fn pending_deposit(user_id: UserId) -> Deposit {
    Deposit::new(DepositDraft {
        id: Uuid::new_v4(),
        user_id,
        waste_type_id: CatalogueId::new("bottles").expect("valid slug"),
        weight_kg: 2.0,
        points_awarded: 100,
        status: DepositStatus::Pending,
        photo_ref: "photos/abc.jpg".to_owned(),
        review: None,
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
                    .service(submit_deposit)
                    .service(list_deposits),
            ),
    )
    .await
}

#[actix_web::test]
async fn submit_returns_the_priced_deposit() {
    let user_id = UserId::random();

    let mut ports = MockPorts::default();
    ports
        .deposits
        .expect_submit_deposit()
        .times(1)
        .return_once(move |request| {
            assert_eq!(request.user_id, user_id);
            assert_eq!(request.waste_type_id.as_ref(), "bottles");
            Ok(pending_deposit(user_id))
        });

    let app = app_with(ports).await;
    let cookie = session_cookie_for(&app, user_id).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/deposits")
            .cookie(cookie)
            .set_json(json!({
                "wasteTypeId": "bottles",
                "weightKg": 2.0,
                "photoRef": "photos/abc.jpg",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["pointsAwarded"], 100);
}

#[actix_web::test]
async fn submit_without_session_is_unauthorised() {
    let mut ports = MockPorts::default();
    ports.deposits.expect_submit_deposit().times(0);

    let app = app_with(ports).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/deposits")
            .set_json(json!({
                "wasteTypeId": "bottles",
                "weightKg": 2.0,
                "photoRef": "photos/abc.jpg",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn submit_with_malformed_waste_type_is_a_bad_request() {
    let user_id = UserId::random();
    let mut ports = MockPorts::default();
    ports.deposits.expect_submit_deposit().times(0);

    let app = app_with(ports).await;
    let cookie = session_cookie_for(&app, user_id).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/deposits")
            .cookie(cookie)
            .set_json(json!({
                "wasteTypeId": "Not A Slug",
                "weightKg": 2.0,
                "photoRef": "photos/abc.jpg",
            }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn history_lists_the_callers_deposits() {
    let user_id = UserId::random();

    let mut ports = MockPorts::default();
    ports
        .ledger
        .expect_deposits_for()
        .times(1)
        .return_once(move |id| {
            assert_eq!(id, user_id);
            Ok(vec![pending_deposit(user_id)])
        });

    let app = app_with(ports).await;
    let cookie = session_cookie_for(&app, user_id).await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/deposits")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(res).await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}
