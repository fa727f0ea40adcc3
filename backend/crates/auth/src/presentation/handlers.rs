//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use platform::cookie::{
    AUTH_TOKEN_COOKIE, CHECKOUT_TOKEN_COOKIE, delete_cookie_header, extract_cookie,
    set_cookie_header,
};
use platform::jwt::TokenService;
use platform::validation::ValidatedJson;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthOutput, IssueGuestSessionUseCase, LoginInput, LoginUseCase, RegisterInput,
    RegisterUseCase, SessionInfo,
};
use crate::domain::port::CartMerger;
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    AuthResponse, GuestSessionResponse, LoginRequest, RegisterRequest, SessionStatusResponse,
};
use crate::presentation::extractors::guest_session_from_headers;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: CartMerger + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub merger: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/v1/auth/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: CartMerger + Clone + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.merger.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let input = RegisterInput {
        email: req.email,
        password: req.password,
        full_name: req.full_name,
        phone: req.phone,
        guest_session_id: guest_session_from_headers(&headers, &state.tokens),
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        session_cookies(&state.config, &output),
        Json(AuthResponse::from(&output)),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/auth/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: CartMerger + Clone + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.merger.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        email: req.email,
        password: req.password,
        guest_session_id: guest_session_from_headers(&headers, &state.tokens),
    };

    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::OK,
        session_cookies(&state.config, &output),
        Json(AuthResponse::from(&output)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/v1/auth/logout
///
/// Tokens are stateless; logging out only clears the cookies.
pub async fn logout<R, M>(State(state): State<AuthAppState<R, M>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: CartMerger + Clone + Send + Sync + 'static,
{
    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        delete_cookie_header(&state.config.auth_cookie()),
    );
    headers.append(
        header::SET_COOKIE,
        delete_cookie_header(&state.config.checkout_cookie()),
    );
    (StatusCode::NO_CONTENT, headers)
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/v1/auth/session
///
/// Never fails with 401: a missing or bad token reports `authenticated: false`.
pub async fn session_status<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: CartMerger + Clone + Send + Sync + 'static,
{
    let session = extract_cookie(&headers, AUTH_TOKEN_COOKIE)
        .and_then(|token| SessionInfo::from_token(&state.tokens, &token));

    match session {
        Some(info) => Json(SessionStatusResponse {
            authenticated: true,
            user_id: Some(info.user_id.to_string()),
            role: Some(info.role.code().to_string()),
            expires_at: Some(info.expires_at),
        }),
        None => Json(SessionStatusResponse {
            authenticated: false,
            user_id: None,
            role: None,
            expires_at: None,
        }),
    }
}

// ============================================================================
// Guest checkout session
// ============================================================================

/// POST /api/v1/auth/guest
pub async fn guest_session<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: CartMerger + Clone + Send + Sync + 'static,
{
    let presented = extract_cookie(&headers, CHECKOUT_TOKEN_COOKIE);
    let output = IssueGuestSessionUseCase::new(state.tokens.clone()).execute(presented.as_deref())?;

    let mut response_headers = HeaderMap::new();
    if let Some(token) = &output.new_token {
        response_headers.insert(
            header::SET_COOKIE,
            set_cookie_header(&state.config.checkout_cookie(), token),
        );
    }

    Ok((
        response_headers,
        Json(GuestSessionResponse {
            guest_session_id: output.guest_session_id.to_string(),
            expires_at: output.expires_at,
        }),
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// `auth_token` cookie, plus removal of a consumed `checkout_token`
fn session_cookies(config: &AuthConfig, output: &AuthOutput) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.append(
        header::SET_COOKIE,
        set_cookie_header(&config.auth_cookie(), &output.token.token),
    );
    if output.guest_session_consumed {
        headers.append(
            header::SET_COOKIE,
            delete_cookie_header(&config.checkout_cookie()),
        );
    }
    headers
}
