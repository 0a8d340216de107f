//! EcoPoints backend entry point.

use color_eyre::eyre::Result;
use ortho_config::OrthoConfig;
use tracing_subscriber::{EnvFilter, fmt};

use ecopoints_backend::server::{self, AppSettings};

/// Application bootstrap: tracing, settings, then the HTTP server.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(err) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        tracing::warn!(error = %err, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())?;
    server::run(settings).await
}
