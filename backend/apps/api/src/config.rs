//! Server configuration from the environment
//!
//! `.env` is loaded first when present. Only `DATABASE_URL` is mandatory,
//! plus `JWT_SECRET` in release builds.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, bail};
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub db_max_connections: u32,
    pub redis_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    /// `None` means a random per-process secret (debug builds only)
    pub jwt_secret: Option<String>,
    pub cookie_secure: bool,
    pub password_pepper: Option<Vec<u8>>,
    pub payment_api_url: String,
    pub payment_secret_key: String,
    pub payment_callback_token: String,
    pub shipping_flat_fee: Decimal,
    pub free_shipping_threshold: Decimal,
    pub default_commission_rate: Decimal,
    pub min_withdrawal: Decimal,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// `lookup` returns the raw value of a variable; blank counts as unset
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let jwt_secret = var("JWT_SECRET");
        if jwt_secret.is_none() && !cfg!(debug_assertions) {
            bail!("JWT_SECRET must be set in production");
        }

        let password_pepper = var("PASSWORD_PEPPER")
            .map(|b64| platform::crypto::from_base64(b64.trim()))
            .transpose()
            .context("PASSWORD_PEPPER must be base64")?;

        let payment_callback_token = var("PAYMENT_CALLBACK_TOKEN").unwrap_or_default();
        if payment_callback_token.is_empty() {
            tracing::warn!("PAYMENT_CALLBACK_TOKEN is not set, payment webhooks will be rejected");
        }

        Ok(Self {
            database_url,
            db_max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 10)?,
            redis_url: var("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            bind_addr: parse_or(&var, "BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 31113)))?,
            frontend_origins: var("FRONTEND_ORIGINS")
                .unwrap_or_else(|| "http://localhost:3000,http://localhost:3001".to_string())
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            jwt_secret,
            cookie_secure: parse_or(&var, "COOKIE_SECURE", !cfg!(debug_assertions))?,
            password_pepper,
            payment_api_url: var("PAYMENT_API_URL")
                .unwrap_or_else(|| "https://api.xendit.co".to_string()),
            payment_secret_key: var("PAYMENT_SECRET_KEY").unwrap_or_default(),
            payment_callback_token,
            shipping_flat_fee: parse_or(&var, "SHIPPING_FLAT_FEE", Decimal::new(15_000, 0))?,
            free_shipping_threshold: parse_or(
                &var,
                "FREE_SHIPPING_THRESHOLD",
                Decimal::new(500_000, 0),
            )?,
            default_commission_rate: parse_or(&var, "DEFAULT_COMMISSION_RATE", Decimal::new(5, 2))?,
            min_withdrawal: parse_or(&var, "MIN_WITHDRAWAL", Decimal::new(50_000, 0))?,
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", name, e)),
        None => Ok(default),
    }
}
