//! Repository Traits

use account::TeamRole;
use kernel::id::{ProductId, SizeId, TeamId, UserId, VariantId};
use kernel::pagination::{Page, PageParams};

use crate::domain::entity::category::Category;
use crate::domain::entity::image::Image;
use crate::domain::entity::product::{Product, ProductDetail, ProductFilter, ProductSummary};
use crate::domain::entity::variant::{Size, Variant};
use crate::error::CatalogResult;

/// Catalog row whose owning team decides write access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTarget {
    Product(ProductId),
    Variant(VariantId),
    Size(SizeId),
}

#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Active products only
    async fn list_products(
        &self,
        filter: &ProductFilter,
        params: &PageParams,
    ) -> CatalogResult<Page<ProductSummary>>;

    /// Active or not; callers decide visibility
    async fn find_detail_by_slug(&self, slug: &str) -> CatalogResult<Option<ProductDetail>>;

    async fn find_product(&self, product_id: &ProductId) -> CatalogResult<Option<Product>>;

    /// Duplicate slug: `SlugTaken`; unknown category: `CategoryNotFound`
    async fn insert_product(&self, product: &Product) -> CatalogResult<()>;

    /// Same errors as insert; `false` when not found
    async fn update_product(&self, product: &Product) -> CatalogResult<bool>;

    async fn find_variant(&self, variant_id: &VariantId) -> CatalogResult<Option<Variant>>;

    /// Duplicate SKU: `SkuTaken`
    async fn insert_variant(&self, variant: &Variant) -> CatalogResult<()>;

    async fn insert_size(&self, size: &Size) -> CatalogResult<()>;

    /// Returns the updated size, `None` when not found
    async fn set_stock(&self, size_id: &SizeId, stock: i32) -> CatalogResult<Option<Size>>;

    async fn count_images(&self, product_id: &ProductId) -> CatalogResult<i64>;

    async fn insert_image(&self, image: &Image) -> CatalogResult<()>;

    async fn owning_team(&self, target: CatalogTarget) -> CatalogResult<Option<TeamId>>;
}

#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    /// Sorted by name
    async fn list_categories(&self) -> CatalogResult<Vec<Category>>;

    /// Duplicate slug: `SlugTaken`
    async fn insert_category(&self, category: &Category) -> CatalogResult<()>;
}

/// Team membership lookup for write authorization
#[trait_variant::make(TeamAccess: Send)]
pub trait LocalTeamAccess {
    async fn team_exists(&self, team_id: &TeamId) -> CatalogResult<bool>;

    async fn team_role(&self, team_id: &TeamId, user_id: &UserId)
    -> CatalogResult<Option<TeamRole>>;
}
