//! `auth_token` and `checkout_token` cookies
//!
//! Both cookies are HttpOnly and scoped to `/`; only `Secure`, `SameSite`
//! and the lifetime vary with deployment.

use std::fmt::Write;

use axum::http::{HeaderMap, HeaderValue, header};

/// Signed user token, lifetime of the auth token
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
/// Anonymous checkout token, lifetime of the guest session
pub const CHECKOUT_TOKEN_COOKIE: &str = "checkout_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: &'static str,
    pub secure: bool,
    pub same_site: SameSite,
    pub max_age_secs: i64,
}

impl CookieConfig {
    pub fn auth_token(secure: bool, max_age_secs: i64) -> Self {
        Self {
            name: AUTH_TOKEN_COOKIE,
            secure,
            same_site: SameSite::Lax,
            max_age_secs,
        }
    }

    pub fn checkout_token(secure: bool, max_age_secs: i64) -> Self {
        Self {
            name: CHECKOUT_TOKEN_COOKIE,
            secure,
            same_site: SameSite::Lax,
            max_age_secs,
        }
    }

    /// `Set-Cookie` value storing `value`
    pub fn build_set_cookie(&self, value: &str) -> String {
        self.render(value, self.max_age_secs)
    }

    /// `Set-Cookie` value expiring the cookie; attributes must match the
    /// ones it was set with or browsers keep it.
    pub fn build_delete_cookie(&self) -> String {
        self.render("", 0)
    }

    fn render(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!("{}={}; HttpOnly", self.name, value);
        if self.secure {
            cookie.push_str("; Secure");
        }
        // Writing into a String cannot fail
        let _ = write!(
            cookie,
            "; SameSite={}; Path=/; Max-Age={}",
            self.same_site.as_str(),
            max_age
        );
        cookie
    }
}

/// First non-empty value of cookie `name`, across every `Cookie` header
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

pub fn set_cookie_header(config: &CookieConfig, value: &str) -> HeaderValue {
    to_header(config.build_set_cookie(value))
}

pub fn delete_cookie_header(config: &CookieConfig) -> HeaderValue {
    to_header(config.build_delete_cookie())
}

// Token values are base64url or JWT, so this only trips on a bad cookie name
fn to_header(cookie: String) -> HeaderValue {
    HeaderValue::from_str(&cookie).unwrap_or_else(|err| {
        tracing::error!(error = %err, "Set-Cookie value is not a valid header");
        HeaderValue::from_static("")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_cookie() {
        let config = CookieConfig::auth_token(true, 604_800);
        assert_eq!(
            config.build_set_cookie("eyJhbGciOi.x.y"),
            "auth_token=eyJhbGciOi.x.y; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=604800"
        );
    }

    #[test]
    fn test_checkout_cookie_for_local_development() {
        let config = CookieConfig {
            same_site: SameSite::Strict,
            ..CookieConfig::checkout_token(false, 86_400)
        };
        assert_eq!(
            config.build_set_cookie("guest"),
            "checkout_token=guest; HttpOnly; SameSite=Strict; Path=/; Max-Age=86400"
        );
    }

    #[test]
    fn test_delete_cookie_keeps_attributes() {
        let config = CookieConfig::auth_token(true, 60);
        assert_eq!(
            config.build_delete_cookie(),
            "auth_token=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0"
        );
        assert_eq!(
            delete_cookie_header(&config).to_str().unwrap(),
            config.build_delete_cookie()
        );
    }

    #[test]
    fn test_extract_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark; auth_token="));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("checkout_token=abc123; auth_token=jwt"),
        );

        assert_eq!(
            extract_cookie(&headers, CHECKOUT_TOKEN_COOKIE).as_deref(),
            Some("abc123")
        );
        // Empty values are skipped
        assert_eq!(extract_cookie(&headers, AUTH_TOKEN_COOKIE).as_deref(), Some("jwt"));
        assert_eq!(extract_cookie(&headers, "session"), None);
    }
}
