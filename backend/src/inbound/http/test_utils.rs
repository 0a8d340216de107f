//! Shared helpers for HTTP adapter tests.

use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::{Key, SameSite};
use actix_web::test;

use crate::domain::UserId;
use crate::inbound::http::session::USER_ID_KEY;

/// Cookie session middleware configured for the test harness: plain cookies,
/// no TLS requirement.
pub(crate) fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// Obtain a session cookie for `user_id` by driving a login-free endpoint.
pub(crate) async fn session_cookie_for<S, B, E>(
    app: &S,
    user_id: UserId,
) -> actix_web::cookie::Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse<B>,
            Error = E,
        >,
    E: std::fmt::Debug,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(&format!("/__test/login/{user_id}"))
            .to_request(),
    )
    .await;
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie issued")
        .into_owned()
}

/// Route factory for the test-only login endpoint used by
/// [`session_cookie_for`].
pub(crate) fn test_login_route() -> actix_web::Route {
    actix_web::web::get().to(
        |session: Session, path: actix_web::web::Path<String>| async move {
            session
                .insert(USER_ID_KEY, path.into_inner())
                .expect("persist test user id");
            actix_web::HttpResponse::Ok().finish()
        },
    )
}

/// Mocked driving ports for handler tests; configure expectations, then turn
/// the bundle into an [`HttpState`].
pub(crate) struct MockPorts {
    pub accounts: crate::domain::ports::MockAccountService,
    pub deposits: crate::domain::ports::MockDepositCommand,
    pub redemptions: crate::domain::ports::MockRedemptionCommand,
    pub review: crate::domain::ports::MockReviewCommand,
    pub ledger: crate::domain::ports::MockLedgerQuery,
    pub stats: crate::domain::ports::MockStatsQuery,
    pub catalogue: crate::domain::ports::MockCatalogueQuery,
}

impl Default for MockPorts {
    fn default() -> Self {
        Self {
            accounts: crate::domain::ports::MockAccountService::new(),
            deposits: crate::domain::ports::MockDepositCommand::new(),
            redemptions: crate::domain::ports::MockRedemptionCommand::new(),
            review: crate::domain::ports::MockReviewCommand::new(),
            ledger: crate::domain::ports::MockLedgerQuery::new(),
            stats: crate::domain::ports::MockStatsQuery::new(),
            catalogue: crate::domain::ports::MockCatalogueQuery::new(),
        }
    }
}

impl MockPorts {
    pub(crate) fn into_state(self) -> crate::inbound::http::state::HttpState {
        use std::sync::Arc;

        crate::inbound::http::state::HttpState {
            accounts: Arc::new(self.accounts),
            deposits: Arc::new(self.deposits),
            redemptions: Arc::new(self.redemptions),
            review: Arc::new(self.review),
            ledger: Arc::new(self.ledger),
            stats: Arc::new(self.stats),
            catalogue: Arc::new(self.catalogue),
        }
    }
}
