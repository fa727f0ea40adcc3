//! Application Layer

pub mod browse;
pub mod config;
pub mod manage;

pub use browse::BrowseCatalogUseCase;
pub use config::CatalogConfig;
pub use manage::{ManageCatalogUseCase, NewProduct};
