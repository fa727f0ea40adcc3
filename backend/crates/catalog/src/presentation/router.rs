//! Catalog Router

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::domain::repository::{CategoryRepository, ProductRepository, TeamAccess};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, config: CatalogConfig) -> Router {
    catalog_router_generic(repo, config)
}

/// Create a generic Catalog router for any repository implementation
pub fn catalog_router_generic<R>(repo: R, config: CatalogConfig) -> Router
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    // `{id}` is a slug on GET and a product id on writes
    Router::new()
        .route(
            "/",
            get(handlers::list_products::<R>).post(handlers::create_product::<R>),
        )
        .route(
            "/categories",
            get(handlers::list_categories::<R>).post(handlers::create_category::<R>),
        )
        .route(
            "/{id}",
            get(handlers::product_detail::<R>)
                .patch(handlers::update_product::<R>)
                .delete(handlers::deactivate_product::<R>),
        )
        .route("/{id}/variants", post(handlers::create_variant::<R>))
        .route("/{id}/images", post(handlers::create_image::<R>))
        .route("/variants/{id}/sizes", post(handlers::create_size::<R>))
        .route("/sizes/{id}/stock", patch(handlers::update_stock::<R>))
        .with_state(state)
}
