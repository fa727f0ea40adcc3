//! Commerce Routers

use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use reseller::PgResellerRepository;
use std::sync::Arc;

use crate::application::config::CommerceConfig;
use crate::domain::port::{PaymentGateway, ReferralProgram};
use crate::domain::repository::{AddressBook, CartRepository, OrderRepository};
use crate::infra::payment::HttpPaymentGateway;
use crate::infra::postgres::PgCommerceRepository;
use crate::infra::referral::ResellerReferralProgram;
use crate::presentation::handlers::{self, CartAppState, CommerceAppState};

/// Referral program used by the PostgreSQL routers
pub type PgReferralProgram = ResellerReferralProgram<PgResellerRepository>;

/// Create the Cart router with PostgreSQL repository
pub fn cart_router(repo: PgCommerceRepository, config: CommerceConfig) -> Router {
    cart_router_generic(repo, config)
}

/// Create a generic Cart router for any repository implementation
pub fn cart_router_generic<R>(repo: R, config: CommerceConfig) -> Router
where
    R: CartRepository + Clone + Send + Sync + 'static,
{
    let state = CartAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::view_cart::<R>).delete(handlers::clear_cart::<R>),
        )
        .route(
            "/items",
            post(handlers::add_item::<R>).patch(handlers::update_item::<R>),
        )
        .route(
            "/items/{variant_id}/{size_id}",
            delete(handlers::remove_item::<R>),
        )
        .with_state(state)
}

fn state<R, G, P>(
    repo: R,
    gateway: Arc<G>,
    referrals: Arc<P>,
    config: CommerceConfig,
) -> CommerceAppState<R, G, P>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    CommerceAppState {
        repo: Arc::new(repo),
        gateway,
        referrals,
        config: Arc::new(config),
    }
}

/// Create the Order router with PostgreSQL repository
pub fn order_router(
    repo: PgCommerceRepository,
    gateway: Arc<HttpPaymentGateway>,
    referrals: Arc<PgReferralProgram>,
    config: CommerceConfig,
) -> Router {
    order_router_generic(repo, gateway, referrals, config)
}

/// Create a generic Order router for any repository implementation
pub fn order_router_generic<R, G, P>(
    repo: R,
    gateway: Arc<G>,
    referrals: Arc<P>,
    config: CommerceConfig,
) -> Router
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::my_orders::<R, G, P>))
        .route("/checkout", post(handlers::checkout::<R, G, P>))
        .route("/track", get(handlers::track::<R, G, P>))
        .route("/admin", get(handlers::admin_orders::<R, G, P>))
        .route("/{code}", get(handlers::order_detail::<R, G, P>))
        .route("/{code}/status", patch(handlers::change_status::<R, G, P>))
        .route("/{code}/cancel", post(handlers::cancel_order::<R, G, P>))
        .with_state(state(repo, gateway, referrals, config))
}

/// Create the Payment router with PostgreSQL repository
pub fn payment_router(
    repo: PgCommerceRepository,
    gateway: Arc<HttpPaymentGateway>,
    referrals: Arc<PgReferralProgram>,
    config: CommerceConfig,
) -> Router {
    payment_router_generic(repo, gateway, referrals, config)
}

/// Create a generic Payment router for any repository implementation
pub fn payment_router_generic<R, G, P>(
    repo: R,
    gateway: Arc<G>,
    referrals: Arc<P>,
    config: CommerceConfig,
) -> Router
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    Router::new()
        .route("/webhook", post(handlers::payment_webhook::<R, G, P>))
        .route("/{code}", get(handlers::payment_status::<R, G, P>))
        .with_state(state(repo, gateway, referrals, config))
}
