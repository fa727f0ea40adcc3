//! Session outputs shared by register and login

use kernel::id::{GuestSessionId, UserId};
use platform::jwt::{IssuedToken, TokenService};

use crate::domain::entity::user::User;
use crate::domain::port::CartMerger;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthResult;

/// Result of a successful register/login
#[derive(Debug, Clone)]
pub struct AuthOutput {
    pub user_id: UserId,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub token: IssuedToken,
    /// Guest cart lines merged into the user's cart
    pub merged_cart_lines: usize,
    /// Whether the caller should clear the `checkout_token` cookie
    pub guest_session_consumed: bool,
}

/// What `GET /auth/session` reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub user_id: UserId,
    pub role: UserRole,
    pub expires_at: i64,
}

impl SessionInfo {
    /// Resolve an `auth_token`. Any failure means "not signed in".
    pub fn from_token(tokens: &TokenService, token: &str) -> Option<Self> {
        let claims = tokens.verify_auth_token(token).ok()?;
        Some(Self {
            user_id: UserId::from_uuid(claims.user_id),
            role: UserRole::from_code(&claims.role)?,
            expires_at: claims.expires_at,
        })
    }
}

/// Merge the guest cart, if any. Never fails the surrounding sign-in.
pub async fn merge_guest_cart<M: CartMerger>(
    merger: &M,
    guest_session_id: Option<GuestSessionId>,
    user_id: UserId,
) -> usize {
    let Some(guest_session_id) = guest_session_id else {
        return 0;
    };

    match merger.merge_guest_cart(guest_session_id, user_id).await {
        Ok(lines) => {
            tracing::info!(
                user_id = %user_id,
                guest_session_id = %guest_session_id,
                lines,
                "Merged guest cart"
            );
            lines
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                user_id = %user_id,
                guest_session_id = %guest_session_id,
                "Guest cart merge failed, continuing sign-in"
            );
            0
        }
    }
}

pub(crate) fn build_output(
    tokens: &TokenService,
    user: &User,
    merged_cart_lines: usize,
    guest_session_consumed: bool,
) -> AuthResult<AuthOutput> {
    let token = tokens.issue_auth_token(user.user_id.into_uuid(), user.user_role.code())?;
    Ok(AuthOutput {
        user_id: user.user_id,
        email: user.email.as_str().to_string(),
        full_name: user.full_name.clone(),
        role: user.user_role,
        token,
        merged_cart_lines,
        guest_session_consumed,
    })
}
