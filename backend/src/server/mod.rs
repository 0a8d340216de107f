//! Server construction and wiring.
//!
//! Builds the Diesel adapters, the domain services, and the actix-web app,
//! then runs the HTTP server. The binary in `main.rs` only loads settings
//! and calls [`run`].

mod config;

pub use config::AppSettings;

use std::sync::Arc;

use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use color_eyre::eyre::{Report, WrapErr, eyre};
use mockable::DefaultClock;
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{
    AccountServiceImpl, CatalogueQueryService, DepositCommandService, LedgerQueryService,
    RedemptionCommandService, ReviewService, StatsQueryService,
};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{accounts, admin, catalogue, deposits, redemptions};
use crate::middleware::trace::Trace;
use crate::outbound::persistence::{
    DbPool, DieselCatalogueRepository, DieselDepositRepository, DieselRedemptionRepository,
    DieselStatsRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use crate::outbound::security::Argon2PasswordHasher;

/// Assemble the driving-port implementations over a database pool.
pub fn build_state(pool: &DbPool, settings: &AppSettings) -> Result<HttpState, Report> {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let deposits = Arc::new(DieselDepositRepository::new(pool.clone()));
    let redemptions = Arc::new(DieselRedemptionRepository::new(pool.clone()));
    let catalogue = Arc::new(DieselCatalogueRepository::new(pool.clone()));
    let stats = Arc::new(DieselStatsRepository::new(pool.clone()));
    let clock = Arc::new(DefaultClock);

    let policy = settings
        .accrual_policy()
        .map_err(|err| eyre!("invalid deposit policy: {err}"))?;
    let offset = settings
        .stats_offset()
        .map_err(|err| eyre!("invalid stats offset: {err}"))?;
    let rates = settings.platform_rates();
    if rates.points_to_idr <= 0 || rates.min_redeem_idr <= 0 || rates.redeem_unit_idr <= 0 {
        return Err(eyre!("platform rates must all be positive"));
    }
    info!(policy = %policy, "accrual policy configured");

    Ok(HttpState {
        accounts: Arc::new(AccountServiceImpl::new(
            users.clone(),
            Arc::new(Argon2PasswordHasher::new()),
            clock.clone(),
        )),
        deposits: Arc::new(DepositCommandService::new(
            deposits.clone(),
            users.clone(),
            catalogue.clone(),
            clock.clone(),
            policy,
            settings.deposit_limits(),
        )),
        redemptions: Arc::new(RedemptionCommandService::new(
            redemptions.clone(),
            users.clone(),
            catalogue.clone(),
            clock.clone(),
            rates,
        )),
        review: Arc::new(ReviewService::new(
            deposits.clone(),
            redemptions.clone(),
            users.clone(),
            clock.clone(),
        )),
        ledger: Arc::new(LedgerQueryService::new(users.clone(), deposits, redemptions)),
        stats: Arc::new(StatsQueryService::new(stats, users, clock, offset)),
        catalogue: Arc::new(CatalogueQueryService::new(catalogue)),
    })
}

fn load_session_key(settings: &AppSettings) -> Result<Key, Report> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(err) => {
            if cfg!(debug_assertions) || settings.session_allow_ephemeral {
                warn!(path = %key_path.display(), error = %err, "using ephemeral session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(eyre!(
                    "failed to read session key at {}: {err}",
                    key_path.display()
                ))
            }
        }
    }
}

/// Run the HTTP server until shutdown.
pub async fn run(settings: AppSettings) -> Result<(), Report> {
    let database_url = settings
        .database_url
        .clone()
        .ok_or_else(|| eyre!("ECOPOINTS_DATABASE_URL is required"))?;

    {
        let database_url = database_url.clone();
        tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
            .await
            .wrap_err("migration task panicked")?
            .wrap_err("migrations failed")?;
    }

    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .wrap_err("failed to build database pool")?;

    let state = web::Data::new(build_state(&pool, &settings)?);
    let key = load_session_key(&settings)?;
    let cookie_secure = settings.cookie_secure();

    let health_state = web::Data::new(HealthState::new());
    let server_health_state = health_state.clone();
    let bind_addr = settings.bind_addr().to_owned();

    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .wrap(session)
            .service(accounts::register)
            .service(accounts::login)
            .service(accounts::logout)
            .service(accounts::current_user)
            .service(accounts::user_balance)
            .service(deposits::submit_deposit)
            .service(deposits::list_deposits)
            .service(redemptions::request_redemption)
            .service(redemptions::list_redemptions)
            .service(catalogue::list_waste_types)
            .service(catalogue::list_reward_options)
            .service(admin::list_pending_deposits)
            .service(admin::approve_deposit)
            .service(admin::reject_deposit)
            .service(admin::list_pending_redemptions)
            .service(admin::complete_redemption)
            .service(admin::fail_redemption)
            .service(admin::admin_stats);

        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(api)
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );

        app
    })
    .bind(&bind_addr)
    .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;

    info!(addr = %bind_addr, "server listening");
    health_state.mark_ready();
    server.run().await.wrap_err("server terminated")
}
