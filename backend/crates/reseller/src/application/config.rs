//! Application Configuration

use platform::cookie::CookieConfig;
use platform::jwt::TokenConfig;
use rust_decimal::Decimal;

/// Reseller application configuration
#[derive(Debug, Clone)]
pub struct ResellerConfig {
    /// Commission rate given to new resellers
    pub default_commission_rate: Decimal,
    /// Smallest amount a reseller may withdraw
    pub min_withdrawal: Decimal,
    pub referral_code_len: usize,
    /// Cookie re-issued after registration so the new role applies immediately
    pub auth_cookie: CookieConfig,
}

impl Default for ResellerConfig {
    fn default() -> Self {
        Self {
            default_commission_rate: Decimal::new(5, 2),
            min_withdrawal: Decimal::new(50_000, 0),
            referral_code_len: 8,
            auth_cookie: CookieConfig::auth_token(true, TokenConfig::default().auth_ttl_secs()),
        }
    }
}

impl ResellerConfig {
    pub fn development() -> Self {
        Self {
            auth_cookie: CookieConfig::auth_token(false, TokenConfig::default().auth_ttl_secs()),
            ..Default::default()
        }
    }

    pub fn with_auth_cookie(mut self, auth_cookie: CookieConfig) -> Self {
        self.auth_cookie = auth_cookie;
        self
    }
}
