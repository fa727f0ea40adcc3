//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Products, variants, sizes, images, categories, repository traits
//! - `application/` - Browse and team-admin use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Public listing of active products with filters, sorting and the lowest variant price
//! - Product page by slug with variants, per-size stock and images
//! - Team owners/admins (or global admins) manage their team's products
//! - Soft delete via `is_active`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
