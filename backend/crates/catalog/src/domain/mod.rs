//! Domain Layer
//!
//! Products, variants, sizes, images, categories and the ports that store them.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::category::Category;
pub use entity::image::Image;
pub use entity::product::{Product, ProductDetail, ProductFilter, ProductPatch, ProductSummary};
pub use entity::variant::{Size, Variant, VariantDetail};
pub use repository::{CatalogTarget, CategoryRepository, ProductRepository, TeamAccess};
pub use value_object::price::Price;
pub use value_object::product_sort::ProductSort;
