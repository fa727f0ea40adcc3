//! Account Router

use axum::{
    Router,
    routing::{get, patch, post, put},
};
use std::sync::Arc;

use crate::application::config::AccountConfig;
use crate::domain::repository::{AddressRepository, ProfileRepository, TeamRepository};
use crate::infra::postgres::PgAccountRepository;
use crate::presentation::handlers::{self, AccountAppState};

/// Create the Account router with PostgreSQL repository
pub fn account_router(repo: PgAccountRepository, config: AccountConfig) -> Router {
    account_router_generic(repo, config)
}

/// Create a generic Account router for any repository implementation
pub fn account_router_generic<R>(repo: R, config: AccountConfig) -> Router
where
    R: ProfileRepository + AddressRepository + TeamRepository + Clone + Send + Sync + 'static,
{
    let state = AccountAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route("/", get(handlers::list_users::<R>))
        .route(
            "/me",
            get(handlers::get_me::<R>).patch(handlers::update_me::<R>),
        )
        .route("/me/password", post(handlers::change_password::<R>))
        .route(
            "/addresses",
            get(handlers::list_addresses::<R>).post(handlers::create_address::<R>),
        )
        .route(
            "/addresses/{id}",
            put(handlers::update_address::<R>).delete(handlers::delete_address::<R>),
        )
        .route(
            "/addresses/{id}/default",
            post(handlers::set_default_address::<R>),
        )
        .route(
            "/teams",
            get(handlers::list_teams::<R>).post(handlers::create_team::<R>),
        )
        .route(
            "/teams/{id}/members",
            get(handlers::list_members::<R>).post(handlers::add_member::<R>),
        )
        .route(
            "/teams/{id}/members/{user_id}",
            patch(handlers::change_member_role::<R>).delete(handlers::remove_member::<R>),
        )
        .route("/{id}/role", patch(handlers::change_role::<R>))
        .with_state(state)
}
