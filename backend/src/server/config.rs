//! Application settings loaded via OrthoConfig.
//!
//! Every value can come from the environment (`ECOPOINTS_*`), a config file,
//! or CLI flags; unset values fall back to the platform defaults the
//! accessors return.

use std::path::PathBuf;

use chrono::FixedOffset;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::domain::{AccrualPolicy, DepositLimits, Error, PlatformRates};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_STATS_UTC_OFFSET_MINUTES: i32 = 7 * 60; // WIB

/// Deployment configuration for the EcoPoints backend.
#[derive(Debug, Clone, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ECOPOINTS")]
pub struct AppSettings {
    /// PostgreSQL connection URL; required to start the server.
    pub database_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Accrual policy: `review-required` (default) or `auto-approve`.
    pub deposit_policy: Option<String>,
    /// IDR paid out per point.
    pub points_to_idr: Option<i64>,
    /// Smallest payout a redemption may request, in whole IDR.
    pub min_redeem_idr: Option<i64>,
    /// Granularity of payout amounts, in whole IDR.
    pub redeem_unit_idr: Option<i64>,
    /// Largest accepted deposit weight in kilograms.
    pub max_deposit_weight_kg: Option<f64>,
    /// Platform-local zone for the stats day window, as minutes east of UTC.
    pub stats_utc_offset_minutes: Option<i32>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Permit an ephemeral generated session key (development only).
    #[ortho_config(default = false)]
    pub session_allow_ephemeral: bool,
    /// Whether session cookies require TLS.
    #[ortho_config(cli_default_as_absent)]
    pub cookie_secure: Option<bool>,
    /// Maximum database connections in the pool.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> &str {
        self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR)
    }

    /// Session key file path.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }

    /// Whether session cookies require TLS; defaults to true.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Pool size, defaulting to 10 connections.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(10)
    }

    /// Resolve the configured accrual policy.
    pub fn accrual_policy(&self) -> Result<AccrualPolicy, Error> {
        match &self.deposit_policy {
            Some(raw) => raw
                .parse()
                .map_err(|err| Error::invalid_request(format!("depositPolicy: {err}"))),
            None => Ok(AccrualPolicy::default()),
        }
    }

    /// Platform rates assembled from the configured overrides.
    pub fn platform_rates(&self) -> PlatformRates {
        let defaults = PlatformRates::default();
        PlatformRates {
            points_to_idr: self.points_to_idr.unwrap_or(defaults.points_to_idr),
            min_redeem_idr: self.min_redeem_idr.unwrap_or(defaults.min_redeem_idr),
            redeem_unit_idr: self.redeem_unit_idr.unwrap_or(defaults.redeem_unit_idr),
        }
    }

    /// Deposit bounds assembled from the configured overrides.
    pub fn deposit_limits(&self) -> DepositLimits {
        let defaults = DepositLimits::default();
        DepositLimits {
            max_weight_kg: self.max_deposit_weight_kg.unwrap_or(defaults.max_weight_kg),
        }
    }

    /// Fixed offset for the stats day window; defaults to UTC+07:00.
    pub fn stats_offset(&self) -> Result<FixedOffset, Error> {
        let minutes = self
            .stats_utc_offset_minutes
            .unwrap_or(DEFAULT_STATS_UTC_OFFSET_MINUTES);
        FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
            Error::invalid_request(format!(
                "statsUtcOffsetMinutes out of range: {minutes}"
            ))
        })
    }
}
