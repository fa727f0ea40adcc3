//! Public catalog browsing

use std::sync::Arc;

use kernel::pagination::{Page, PageParams};

use crate::domain::entity::category::Category;
use crate::domain::entity::product::{ProductDetail, ProductFilter, ProductSummary};
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};

pub struct BrowseCatalogUseCase<R>
where
    R: ProductRepository + CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> BrowseCatalogUseCase<R>
where
    R: ProductRepository + CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        filter: ProductFilter,
        params: &PageParams,
    ) -> CatalogResult<Page<ProductSummary>> {
        let filter = ProductFilter {
            category: normalize(filter.category).map(|s| s.to_lowercase()),
            team: normalize(filter.team).map(|s| s.to_lowercase()),
            q: normalize(filter.q),
            sort: filter.sort,
        };
        self.repo.list_products(&filter, params).await
    }

    /// Inactive products are hidden
    pub async fn detail(&self, slug: &str) -> CatalogResult<ProductDetail> {
        self.repo
            .find_detail_by_slug(slug)
            .await?
            .filter(|d| d.product.is_active)
            .ok_or(CatalogError::ProductNotFound)
    }

    pub async fn categories(&self) -> CatalogResult<Vec<Category>> {
        self.repo.list_categories().await
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
