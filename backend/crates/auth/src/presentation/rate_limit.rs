//! Rate limiting middleware
//!
//! One layer for the whole API. The scope is chosen from the request path
//! and the counter is keyed by the signed-in user, or the client IP for
//! anonymous traffic.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::client::extract_client_ip;
use platform::jwt::TokenService;
use platform::rate_limit::{RateLimitConfig, RateLimitStore, now_ms};

use crate::presentation::extractors::CurrentUser;

pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

pub const SCOPE_AUTH: &str = "auth";
pub const SCOPE_CHECKOUT: &str = "checkout";
pub const SCOPE_WITHDRAW: &str = "withdraw";
pub const SCOPE_DEFAULT: &str = "default";

// ============================================================================
// Policy
// ============================================================================

/// Per-scope limits
#[derive(Debug, Clone)]
pub struct RateLimitPolicy {
    scopes: HashMap<&'static str, RateLimitConfig>,
    default: RateLimitConfig,
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        let mut scopes = HashMap::new();
        scopes.insert(SCOPE_AUTH, RateLimitConfig::new(10, 60));
        scopes.insert(SCOPE_CHECKOUT, RateLimitConfig::new(20, 60));
        scopes.insert(SCOPE_WITHDRAW, RateLimitConfig::new(5, 60));
        Self {
            scopes,
            default: RateLimitConfig::new(120, 60),
        }
    }
}

impl RateLimitPolicy {
    /// Override one scope
    pub fn with_scope(mut self, scope: &'static str, config: RateLimitConfig) -> Self {
        if scope == SCOPE_DEFAULT {
            self.default = config;
        } else {
            self.scopes.insert(scope, config);
        }
        self
    }

    /// Scope for a request
    pub fn scope_for(method: &Method, path: &str) -> &'static str {
        if path.starts_with("/api/v1/auth") {
            SCOPE_AUTH
        } else if method == Method::POST && path == "/api/v1/order/checkout" {
            SCOPE_CHECKOUT
        } else if method == Method::POST && path == "/api/v1/withdraw" {
            SCOPE_WITHDRAW
        } else {
            SCOPE_DEFAULT
        }
    }

    pub fn config_for(&self, scope: &str) -> &RateLimitConfig {
        self.scopes.get(scope).unwrap_or(&self.default)
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Middleware state
pub struct RateLimiter<S> {
    pub store: Arc<S>,
    pub policy: Arc<RateLimitPolicy>,
}

impl<S> Clone for RateLimiter<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            policy: self.policy.clone(),
        }
    }
}

impl<S> RateLimiter<S> {
    pub fn new(store: S, policy: RateLimitPolicy) -> Self {
        Self {
            store: Arc::new(store),
            policy: Arc::new(policy),
        }
    }
}

/// Counter key: `user:{id}` for a valid `auth_token`, `ip:{addr}` otherwise
fn identity(req: &Request) -> String {
    let user = req
        .extensions()
        .get::<Arc<TokenService>>()
        .and_then(|tokens| CurrentUser::from_headers(req.headers(), tokens).ok().flatten());
    if let Some(user) = user {
        return format!("user:{}", user.user_id);
    }

    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    match extract_client_ip(req.headers(), direct_ip) {
        Some(ip) => format!("ip:{}", ip),
        None => "ip:unknown".to_string(),
    }
}

/// Apply with `axum::middleware::from_fn_with_state`
pub async fn rate_limit<S>(
    State(limiter): State<RateLimiter<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let scope = RateLimitPolicy::scope_for(req.method(), req.uri().path());
    let config = limiter.policy.config_for(scope);
    let key = format!("{}:{}", scope, identity(&req));

    let result = match limiter.store.check_and_increment(&key, config).await {
        Ok(result) => result,
        Err(e) => {
            // Store unavailable: serve the request unthrottled
            tracing::warn!(error = %e, scope, "Rate limit store error");
            return next.run(req).await;
        }
    };

    if !result.allowed {
        let retry_after = result.retry_after_secs(now_ms());
        tracing::info!(scope, retry_after, "Rate limit exceeded");

        let mut response =
            AppError::too_many_requests("Too many requests, please slow down").into_response();
        let headers = response.headers_mut();
        headers.insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(0u32));
        return response;
    }

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(X_RATELIMIT_REMAINING, HeaderValue::from(result.remaining));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_for_paths() {
        assert_eq!(
            RateLimitPolicy::scope_for(&Method::POST, "/api/v1/auth/login"),
            SCOPE_AUTH
        );
        assert_eq!(
            RateLimitPolicy::scope_for(&Method::GET, "/api/v1/auth/session"),
            SCOPE_AUTH
        );
        assert_eq!(
            RateLimitPolicy::scope_for(&Method::POST, "/api/v1/order/checkout"),
            SCOPE_CHECKOUT
        );
        assert_eq!(
            RateLimitPolicy::scope_for(&Method::POST, "/api/v1/withdraw"),
            SCOPE_WITHDRAW
        );
        assert_eq!(
            RateLimitPolicy::scope_for(&Method::GET, "/api/v1/withdraw"),
            SCOPE_DEFAULT
        );
        assert_eq!(
            RateLimitPolicy::scope_for(&Method::GET, "/api/v1/products"),
            SCOPE_DEFAULT
        );
    }

    #[test]
    fn test_default_limits() {
        let policy = RateLimitPolicy::default();
        assert_eq!(policy.config_for(SCOPE_AUTH).max_requests, 10);
        assert_eq!(policy.config_for(SCOPE_CHECKOUT).max_requests, 20);
        assert_eq!(policy.config_for(SCOPE_WITHDRAW).max_requests, 5);
        assert_eq!(policy.config_for(SCOPE_DEFAULT).max_requests, 120);
        assert_eq!(policy.config_for("unknown").max_requests, 120);
    }

    #[test]
    fn test_with_scope_overrides() {
        let policy = RateLimitPolicy::default()
            .with_scope(SCOPE_AUTH, RateLimitConfig::new(2, 60))
            .with_scope(SCOPE_DEFAULT, RateLimitConfig::new(7, 60));
        assert_eq!(policy.config_for(SCOPE_AUTH).max_requests, 2);
        assert_eq!(policy.config_for(SCOPE_DEFAULT).max_requests, 7);
    }
}
