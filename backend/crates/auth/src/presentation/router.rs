//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::jwt::TokenService;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::port::CartMerger;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router<M>(
    repo: PgAuthRepository,
    merger: M,
    tokens: Arc<TokenService>,
    config: AuthConfig,
) -> Router
where
    M: CartMerger + Clone + Send + Sync + 'static,
{
    auth_router_generic(repo, merger, tokens, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R, M>(
    repo: R,
    merger: M,
    tokens: Arc<TokenService>,
    config: AuthConfig,
) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: CartMerger + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        merger: Arc::new(merger),
        tokens,
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/logout", post(handlers::logout::<R, M>))
        .route("/session", get(handlers::session_status::<R, M>))
        .route("/guest", post(handlers::guest_session::<R, M>))
        .with_state(state)
}
