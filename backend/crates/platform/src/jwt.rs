//! Signed Tokens
//!
//! HS256 JWTs for the two cookie-borne credentials:
//! - `auth`: identifies a signed-in user and carries their role code
//! - `checkout`: identifies an anonymous guest checkout session
//!
//! Both share one key, issuer and audience; the `kind` claim keeps one from
//! being accepted where the other is expected.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::crypto::random_token;

/// Minimum accepted secret length in bytes
pub const MIN_SECRET_LEN: usize = 32;

// ============================================================================
// Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    /// Lifetime of `auth` tokens (and the `auth_token` cookie)
    pub auth_ttl: Duration,
    /// Lifetime of `checkout` tokens (and the `checkout_token` cookie)
    pub checkout_ttl: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            issuer: "storefront-api".to_string(),
            audience: "storefront".to_string(),
            auth_ttl: Duration::days(7),
            checkout_ttl: Duration::hours(24),
        }
    }
}

impl TokenConfig {
    /// Config with a random secret; tokens die with the process
    pub fn with_random_secret() -> Self {
        Self {
            secret: random_token(48),
            ..Default::default()
        }
    }

    pub fn with_secret(secret: impl Into<String>) -> Result<Self, TokenError> {
        let secret = secret.into();
        if secret.len() < MIN_SECRET_LEN {
            return Err(TokenError::Config(format!(
                "JWT secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        Ok(Self {
            secret,
            ..Default::default()
        })
    }

    pub fn auth_ttl_secs(&self) -> i64 {
        self.auth_ttl.num_seconds()
    }

    pub fn checkout_ttl_secs(&self) -> i64 {
        self.checkout_ttl.num_seconds()
    }
}

// ============================================================================
// Claims
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Auth,
    Checkout,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// user_id for `auth`, guest_session_id for `checkout`
    pub sub: String,
    /// Role code, `auth` tokens only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// Verified `auth` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClaims {
    pub user_id: Uuid,
    pub role: String,
    pub expires_at: i64,
}

/// Verified `checkout` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutClaims {
    pub guest_session_id: Uuid,
    pub expires_at: i64,
}

/// Freshly signed token with its expiry (unix seconds)
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Token configuration error: {0}")]
    Config(String),
}

// ============================================================================
// Service
// ============================================================================

#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    pub fn issue_auth_token(&self, user_id: Uuid, role: &str) -> Result<IssuedToken, TokenError> {
        self.issue(
            user_id,
            Some(role.to_string()),
            TokenKind::Auth,
            self.config.auth_ttl,
        )
    }

    pub fn issue_checkout_token(&self, guest_session_id: Uuid) -> Result<IssuedToken, TokenError> {
        self.issue(
            guest_session_id,
            None,
            TokenKind::Checkout,
            self.config.checkout_ttl,
        )
    }

    pub fn verify_auth_token(&self, token: &str) -> Result<AuthClaims, TokenError> {
        let claims = self.verify(token, TokenKind::Auth)?;
        let role = claims
            .role
            .ok_or_else(|| TokenError::Invalid("missing role claim".to_string()))?;
        Ok(AuthClaims {
            user_id: parse_subject(&claims.sub)?,
            role,
            expires_at: claims.exp,
        })
    }

    pub fn verify_checkout_token(&self, token: &str) -> Result<CheckoutClaims, TokenError> {
        let claims = self.verify(token, TokenKind::Checkout)?;
        Ok(CheckoutClaims {
            guest_session_id: parse_subject(&claims.sub)?,
            expires_at: claims.exp,
        })
    }

    fn issue(
        &self,
        subject: Uuid,
        role: Option<String>,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let expires_at = (now + ttl).timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            role,
            kind,
            iat: now.timestamp(),
            exp: expires_at,
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            }
        })?;

        if data.claims.kind != expected {
            return Err(TokenError::Invalid(format!(
                "expected {:?} token, got {:?}",
                expected, data.claims.kind
            )));
        }

        Ok(data.claims)
    }
}

fn parse_subject(sub: &str) -> Result<Uuid, TokenError> {
    Uuid::parse_str(sub).map_err(|_| TokenError::Invalid("malformed subject".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(TokenConfig::with_random_secret())
    }

    #[test]
    fn test_auth_token_roundtrip() {
        let svc = service();
        let user_id = Uuid::new_v4();
        let issued = svc.issue_auth_token(user_id, "reseller").unwrap();

        let claims = svc.verify_auth_token(&issued.token).unwrap();
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.role, "reseller");
        assert_eq!(claims.expires_at, issued.expires_at);
    }

    #[test]
    fn test_checkout_token_roundtrip() {
        let svc = service();
        let guest = Uuid::new_v4();
        let issued = svc.issue_checkout_token(guest).unwrap();

        let claims = svc.verify_checkout_token(&issued.token).unwrap();
        assert_eq!(claims.guest_session_id, guest);
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let svc = service();
        let checkout = svc.issue_checkout_token(Uuid::new_v4()).unwrap();
        assert!(matches!(
            svc.verify_auth_token(&checkout.token),
            Err(TokenError::Invalid(_))
        ));

        let auth = svc.issue_auth_token(Uuid::new_v4(), "customer").unwrap();
        assert!(matches!(
            svc.verify_checkout_token(&auth.token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let issued = service()
            .issue_auth_token(Uuid::new_v4(), "admin")
            .unwrap();
        assert!(matches!(
            service().verify_auth_token(&issued.token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let config = TokenConfig {
            auth_ttl: Duration::seconds(-120),
            ..TokenConfig::with_random_secret()
        };
        let svc = TokenService::new(config);
        let issued = svc.issue_auth_token(Uuid::new_v4(), "customer").unwrap();

        assert!(matches!(
            svc.verify_auth_token(&issued.token),
            Err(TokenError::Expired)
        ));
    }

    #[test]
    fn test_garbage_token() {
        assert!(matches!(
            service().verify_auth_token("not.a.jwt"),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(matches!(
            TokenConfig::with_secret("short"),
            Err(TokenError::Config(_))
        ));
        assert!(TokenConfig::with_secret("x".repeat(MIN_SECRET_LEN)).is_ok());
    }

    #[test]
    fn test_default_lifetimes() {
        let config = TokenConfig::default();
        assert_eq!(config.auth_ttl_secs(), 7 * 24 * 3600);
        assert_eq!(config.checkout_ttl_secs(), 24 * 3600);
    }
}
