//! Reseller Routers

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::ResellerConfig;
use crate::domain::repository::{ResellerRepository, WithdrawalRepository};
use crate::infra::postgres::PgResellerRepository;
use crate::presentation::handlers::{self, ResellerAppState};

fn state<R>(repo: R, config: ResellerConfig) -> ResellerAppState<R>
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    ResellerAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    }
}

/// Create the Reseller router with PostgreSQL repository
pub fn reseller_router(repo: PgResellerRepository, config: ResellerConfig) -> Router {
    reseller_router_generic(repo, config)
}

/// Create a generic Reseller router for any repository implementation
pub fn reseller_router_generic<R>(repo: R, config: ResellerConfig) -> Router
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/me", get(handlers::me::<R>))
        .route("/transactions", get(handlers::transactions::<R>))
        .with_state(state(repo, config))
}

/// Create the Withdrawal router with PostgreSQL repository
pub fn withdraw_router(repo: PgResellerRepository, config: ResellerConfig) -> Router {
    withdraw_router_generic(repo, config)
}

/// Create a generic Withdrawal router for any repository implementation
pub fn withdraw_router_generic<R>(repo: R, config: ResellerConfig) -> Router
where
    R: ResellerRepository + WithdrawalRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            post(handlers::create_withdrawal::<R>).get(handlers::my_withdrawals::<R>),
        )
        .route("/admin", get(handlers::admin_list::<R>))
        .route("/{id}/approve", post(handlers::approve::<R>))
        .route("/{id}/reject", post(handlers::reject::<R>))
        .with_state(state(repo, config))
}
