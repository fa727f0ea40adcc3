//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, TeamId, VariantId};
use kernel::pagination::PageParams;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::manage::NewProduct;
use crate::domain::entity::category::Category;
use crate::domain::entity::image::Image;
use crate::domain::entity::product::{
    Product, ProductDetail, ProductFilter, ProductPatch, ProductSummary,
};
use crate::domain::entity::variant::{Size, Variant, VariantDetail};
use crate::domain::value_object::price::Price;
use crate::domain::value_object::product_sort::ProductSort;
use crate::error::CatalogResult;

// ============================================================================
// Public listing
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub category: Option<String>,
    pub team: Option<String>,
    pub q: Option<String>,
    #[serde(default)]
    pub sort: ProductSort,
}

impl ProductListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }

    pub fn into_filter(self) -> ProductFilter {
        ProductFilter {
            category: self.category,
            team: self.team,
            q: self.q,
            sort: self.sort,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummaryResponse {
    pub product_id: String,
    pub team_id: String,
    pub name: String,
    pub slug: String,
    pub category_slug: Option<String>,
    pub min_price: Decimal,
    pub primary_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ProductSummary> for ProductSummaryResponse {
    fn from(s: ProductSummary) -> Self {
        Self {
            product_id: s.product_id.to_string(),
            team_id: s.team_id.to_string(),
            name: s.name,
            slug: s.slug,
            category_slug: s.category_slug,
            min_price: s.min_price,
            primary_image: s.primary_image,
            created_at: s.created_at,
        }
    }
}

// ============================================================================
// Product page
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeResponse {
    pub size_id: String,
    pub label: String,
    pub stock: i32,
    pub in_stock: bool,
}

impl From<Size> for SizeResponse {
    fn from(s: Size) -> Self {
        Self {
            size_id: s.size_id.to_string(),
            in_stock: s.is_available(1),
            label: s.label,
            stock: s.stock,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantResponse {
    pub variant_id: String,
    pub name: String,
    pub sku: String,
    pub price: Option<Decimal>,
    pub effective_price: Option<Decimal>,
    pub sizes: Vec<SizeResponse>,
}

impl From<Variant> for VariantResponse {
    fn from(v: Variant) -> Self {
        Self {
            variant_id: v.variant_id.to_string(),
            name: v.name,
            sku: v.sku,
            price: v.price.map(|p| p.amount()),
            effective_price: None,
            sizes: Vec::new(),
        }
    }
}

impl From<VariantDetail> for VariantResponse {
    fn from(d: VariantDetail) -> Self {
        Self {
            effective_price: Some(d.effective_price),
            sizes: d.sizes.into_iter().map(SizeResponse::from).collect(),
            ..VariantResponse::from(d.variant)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponse {
    pub image_id: String,
    pub variant_id: Option<String>,
    pub url: String,
    pub position: i32,
}

impl From<Image> for ImageResponse {
    fn from(i: Image) -> Self {
        Self {
            image_id: i.image_id.to_string(),
            variant_id: i.variant_id.map(|v| v.to_string()),
            url: i.url,
            position: i.position,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub category_id: String,
    pub name: String,
    pub slug: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            category_id: c.category_id.to_string(),
            name: c.name,
            slug: c.slug,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub product_id: String,
    pub team_id: String,
    pub category_id: Option<String>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub base_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            product_id: p.product_id.to_string(),
            team_id: p.team_id.to_string(),
            category_id: p.category_id.map(|c| c.to_string()),
            name: p.name,
            slug: p.slug,
            description: p.description,
            base_price: p.base_price.amount(),
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub category: Option<CategoryResponse>,
    pub variants: Vec<VariantResponse>,
    pub images: Vec<ImageResponse>,
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(d: ProductDetail) -> Self {
        Self {
            product: ProductResponse::from(d.product),
            category: d.category.map(CategoryResponse::from),
            variants: d.variants.into_iter().map(VariantResponse::from).collect(),
            images: d.images.into_iter().map(ImageResponse::from).collect(),
        }
    }
}

// ============================================================================
// Team admin
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub team_id: TeamId,
    pub category_id: Option<CategoryId>,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(
        length(min = 1, max = 120),
        custom(function = "platform::validation::validate_slug")
    )]
    pub slug: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: String,
    pub base_price: Decimal,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            team_id: req.team_id,
            category_id: req.category_id,
            name: req.name,
            slug: req.slug,
            description: req.description,
            base_price: req.base_price,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub category_id: Option<CategoryId>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(
        length(min = 1, max = 120),
        custom(function = "platform::validation::validate_slug")
    )]
    pub slug: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl UpdateProductRequest {
    pub fn into_patch(self) -> CatalogResult<ProductPatch> {
        Ok(ProductPatch {
            category_id: self.category_id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            base_price: self.base_price.map(Price::new).transpose()?,
            is_active: self.is_active,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVariantRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(length(min = 1, max = 64))]
    pub sku: String,
    pub price: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSizeRequest {
    #[validate(length(min = 1, max = 32))]
    pub label: String,
    #[validate(range(min = 0))]
    pub stock: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockRequest {
    #[validate(range(min = 0))]
    pub stock: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateImageRequest {
    #[validate(url, length(max = 2048))]
    pub url: String,
    pub variant_id: Option<VariantId>,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub position: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    #[validate(
        length(min = 1, max = 120),
        custom(function = "platform::validation::validate_slug")
    )]
    pub slug: String,
}
