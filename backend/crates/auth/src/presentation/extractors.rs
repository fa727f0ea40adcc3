//! Request extractors
//!
//! Identity is read from cookies and verified with the [`TokenService`]
//! installed as an `Extension<Arc<TokenService>>` layer on the app router.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, request::Parts};
use kernel::id::{GuestSessionId, UserId};
use platform::cookie::{AUTH_TOKEN_COOKIE, CHECKOUT_TOKEN_COOKIE, extract_cookie};
use platform::jwt::TokenService;

use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;

/// Token service from request extensions
pub fn token_service(parts: &Parts) -> Result<Arc<TokenService>, AuthError> {
    parts
        .extensions
        .get::<Arc<TokenService>>()
        .cloned()
        .ok_or_else(|| AuthError::Internal("TokenService extension not installed".to_string()))
}

// ============================================================================
// CurrentUser
// ============================================================================

/// Signed-in user from a valid `auth_token` cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub role: UserRole,
    pub expires_at: i64,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// `Ok` when the role is admin, `Forbidden` otherwise
    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Resolve from the request without caching
    fn resolve(parts: &Parts) -> Result<Option<Self>, AuthError> {
        if extract_cookie(&parts.headers, AUTH_TOKEN_COOKIE).is_none() {
            return Ok(None);
        }
        let tokens = token_service(parts)?;
        Self::from_headers(&parts.headers, &tokens)
    }

    /// `None` without an `auth_token` cookie, an error for a bad one
    pub fn from_headers(
        headers: &HeaderMap,
        tokens: &TokenService,
    ) -> Result<Option<Self>, AuthError> {
        let Some(token) = extract_cookie(headers, AUTH_TOKEN_COOKIE) else {
            return Ok(None);
        };
        let claims = tokens.verify_auth_token(&token)?;
        let role = UserRole::from_code(&claims.role).ok_or(AuthError::InvalidToken)?;

        Ok(Some(Self {
            user_id: UserId::from_uuid(claims.user_id),
            role,
            expires_at: claims.expires_at,
        }))
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by an earlier extractor on this request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(*user);
        }

        let user = Self::resolve(parts)?.ok_or(AuthError::NotAuthenticated)?;
        parts.extensions.insert(user);
        Ok(user)
    }
}

/// `Option<CurrentUser>` that still rejects tampered tokens
#[derive(Debug, Clone, Copy)]
pub struct MaybeUser(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(Self(Some(*user)));
        }
        match CurrentUser::resolve(parts) {
            Ok(user) => Ok(Self(user)),
            // An expired session browses anonymously
            Err(AuthError::TokenExpired) => Ok(Self(None)),
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// AdminUser
// ============================================================================

/// Signed-in user whose role is `admin`
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub CurrentUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = CurrentUser::from_request_parts(parts, state).await?;
        user.require_admin()?;
        Ok(Self(user))
    }
}

// ============================================================================
// CartOwner
// ============================================================================

/// Whoever owns the cart of this request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOwner {
    User(UserId),
    Guest(GuestSessionId),
}

impl CartOwner {
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            CartOwner::User(id) => Some(*id),
            CartOwner::Guest(_) => None,
        }
    }
}

impl<S> FromRequestParts<S> for CartOwner
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_error = match CurrentUser::from_request_parts(parts, state).await {
            Ok(user) => return Ok(CartOwner::User(user.user_id)),
            Err(e) => e,
        };

        // Any unusable auth token falls back to the checkout token
        let Some(token) = extract_cookie(&parts.headers, CHECKOUT_TOKEN_COOKIE) else {
            return Err(match auth_error {
                AuthError::NotAuthenticated | AuthError::TokenExpired => AuthError::NoCartOwner,
                other => other,
            });
        };
        let claims = token_service(parts)?.verify_checkout_token(&token)?;

        Ok(CartOwner::Guest(GuestSessionId::from_uuid(
            claims.guest_session_id,
        )))
    }
}

/// Guest session from the `checkout_token` cookie, if valid
pub fn guest_session_from_headers(
    headers: &HeaderMap,
    tokens: &TokenService,
) -> Option<GuestSessionId> {
    let token = extract_cookie(headers, CHECKOUT_TOKEN_COOKIE)?;
    let claims = tokens.verify_checkout_token(&token).ok()?;
    Some(GuestSessionId::from_uuid(claims.guest_session_id))
}
