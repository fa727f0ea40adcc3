//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::session::AuthOutput;

// ============================================================================
// Register / Login
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email, length(max = 254))]
    pub email: String,
    /// Strength is checked by the password policy, not here
    #[validate(length(min = 1, max = 256))]
    pub password: String,
    #[validate(length(min = 1, max = 120))]
    pub full_name: String,
    #[validate(custom(function = "platform::validation::validate_phone"))]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Register / login response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user_id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    /// Unix seconds
    pub expires_at: i64,
    pub merged_cart_lines: usize,
}

impl From<&AuthOutput> for AuthResponse {
    fn from(output: &AuthOutput) -> Self {
        Self {
            user_id: output.user_id.to_string(),
            email: output.email.clone(),
            full_name: output.full_name.clone(),
            role: output.role.code().to_string(),
            expires_at: output.token.expires_at,
            merged_cart_lines: output.merged_cart_lines,
        }
    }
}

// ============================================================================
// Session Status
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub user_id: Option<String>,
    pub role: Option<String>,
    pub expires_at: Option<i64>,
}

// ============================================================================
// Guest checkout session
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSessionResponse {
    pub guest_session_id: String,
    pub expires_at: i64,
}
