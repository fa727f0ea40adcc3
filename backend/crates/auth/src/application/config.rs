//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::cookie::CookieConfig;
use platform::jwt::TokenConfig;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Whether to require Secure cookies
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// `auth_token` cookie lifetime, matches the token lifetime
    pub auth_cookie_max_age_secs: i64,
    /// `checkout_token` cookie lifetime
    pub checkout_cookie_max_age_secs: i64,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        let tokens = TokenConfig::default();
        Self {
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            auth_cookie_max_age_secs: tokens.auth_ttl_secs(),
            checkout_cookie_max_age_secs: tokens.checkout_ttl_secs(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Cookie lifetimes taken from the token configuration
    pub fn for_tokens(tokens: &TokenConfig, cookie_secure: bool) -> Self {
        Self {
            cookie_secure,
            auth_cookie_max_age_secs: tokens.auth_ttl_secs(),
            checkout_cookie_max_age_secs: tokens.checkout_ttl_secs(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    pub fn auth_cookie(&self) -> CookieConfig {
        CookieConfig {
            same_site: self.cookie_same_site,
            ..CookieConfig::auth_token(self.cookie_secure, self.auth_cookie_max_age_secs)
        }
    }

    pub fn checkout_cookie(&self) -> CookieConfig {
        CookieConfig {
            same_site: self.cookie_same_site,
            ..CookieConfig::checkout_token(self.cookie_secure, self.checkout_cookie_max_age_secs)
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
