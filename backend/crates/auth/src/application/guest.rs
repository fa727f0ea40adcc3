//! Guest Checkout Session Use Case

use std::sync::Arc;

use kernel::id::GuestSessionId;
use platform::jwt::TokenService;

use crate::error::AuthResult;

#[derive(Debug, Clone)]
pub struct GuestSessionOutput {
    pub guest_session_id: GuestSessionId,
    /// `None` when the presented token is still valid and was reused
    pub new_token: Option<String>,
    pub expires_at: i64,
}

pub struct IssueGuestSessionUseCase {
    tokens: Arc<TokenService>,
}

impl IssueGuestSessionUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Reuse the presented `checkout_token` if it verifies, otherwise mint one
    pub fn execute(&self, presented: Option<&str>) -> AuthResult<GuestSessionOutput> {
        if let Some(claims) = presented.and_then(|t| self.tokens.verify_checkout_token(t).ok()) {
            return Ok(GuestSessionOutput {
                guest_session_id: GuestSessionId::from_uuid(claims.guest_session_id),
                new_token: None,
                expires_at: claims.expires_at,
            });
        }

        let guest_session_id = GuestSessionId::new();
        let issued = self
            .tokens
            .issue_checkout_token(guest_session_id.into_uuid())?;

        tracing::debug!(guest_session_id = %guest_session_id, "Issued checkout token");

        Ok(GuestSessionOutput {
            guest_session_id,
            new_token: Some(issued.token),
            expires_at: issued.expires_at,
        })
    }
}
