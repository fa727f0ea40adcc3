//! HTTP Handlers

use std::sync::Arc;

use auth::{AdminUser, CurrentUser};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::{ProductId, SizeId, VariantId};
use platform::validation::ValidatedJson;

use crate::application::config::CatalogConfig;
use crate::application::{BrowseCatalogUseCase, ManageCatalogUseCase};
use crate::domain::repository::{CategoryRepository, ProductRepository, TeamAccess};
use crate::error::CatalogResult;
use crate::presentation::dto::*;

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CatalogConfig>,
}

impl<R> CatalogAppState<R>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    fn manage(&self) -> ManageCatalogUseCase<R> {
        ManageCatalogUseCase::new(self.repo.clone(), self.config.clone())
    }
}

// ============================================================================
// Public
// ============================================================================

/// GET /api/v1/product
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
    Query(query): Query<ProductListQuery>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let params = query.page_params();
    let page = BrowseCatalogUseCase::new(state.repo.clone())
        .list(query.into_filter(), &params)
        .await?;
    Ok(Json(page.map(ProductSummaryResponse::from)))
}

/// GET /api/v1/product/{slug}
pub async fn product_detail<R>(
    State(state): State<CatalogAppState<R>>,
    Path(slug): Path<String>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let detail = BrowseCatalogUseCase::new(state.repo.clone())
        .detail(&slug)
        .await?;
    Ok(Json(ProductDetailResponse::from(detail)))
}

/// GET /api/v1/product/categories
pub async fn list_categories<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let categories = BrowseCatalogUseCase::new(state.repo.clone())
        .categories()
        .await?;
    Ok(Json(
        categories
            .into_iter()
            .map(CategoryResponse::from)
            .collect::<Vec<_>>(),
    ))
}

// ============================================================================
// Team admin
// ============================================================================

/// POST /api/v1/product
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateProductRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let product = state.manage().create_product(&user, req.into()).await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

/// PATCH /api/v1/product/{id}
pub async fn update_product<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(product_id): Path<ProductId>,
    ValidatedJson(req): ValidatedJson<UpdateProductRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let product = state
        .manage()
        .update_product(&user, &product_id, req.into_patch()?)
        .await?;
    Ok(Json(ProductResponse::from(product)))
}

/// DELETE /api/v1/product/{id}
pub async fn deactivate_product<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(product_id): Path<ProductId>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    state.manage().deactivate_product(&user, &product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/product/{id}/variants
pub async fn create_variant<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(product_id): Path<ProductId>,
    ValidatedJson(req): ValidatedJson<CreateVariantRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let variant = state
        .manage()
        .add_variant(&user, &product_id, req.name, req.sku, req.price)
        .await?;
    Ok((StatusCode::CREATED, Json(VariantResponse::from(variant))))
}

/// POST /api/v1/product/variants/{id}/sizes
pub async fn create_size<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(variant_id): Path<VariantId>,
    ValidatedJson(req): ValidatedJson<CreateSizeRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let size = state
        .manage()
        .add_size(&user, &variant_id, req.label, req.stock)
        .await?;
    Ok((StatusCode::CREATED, Json(SizeResponse::from(size))))
}

/// PATCH /api/v1/product/sizes/{id}/stock
pub async fn update_stock<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(size_id): Path<SizeId>,
    ValidatedJson(req): ValidatedJson<StockRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let size = state.manage().set_stock(&user, &size_id, req.stock).await?;
    Ok(Json(SizeResponse::from(size)))
}

/// POST /api/v1/product/{id}/images
pub async fn create_image<R>(
    State(state): State<CatalogAppState<R>>,
    user: CurrentUser,
    Path(product_id): Path<ProductId>,
    ValidatedJson(req): ValidatedJson<CreateImageRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let image = state
        .manage()
        .add_image(&user, &product_id, req.url, req.variant_id, req.position)
        .await?;
    Ok((StatusCode::CREATED, Json(ImageResponse::from(image))))
}

/// POST /api/v1/product/categories
pub async fn create_category<R>(
    State(state): State<CatalogAppState<R>>,
    _admin: AdminUser,
    ValidatedJson(req): ValidatedJson<CreateCategoryRequest>,
) -> CatalogResult<impl IntoResponse>
where
    R: ProductRepository + CategoryRepository + TeamAccess + Clone + Send + Sync + 'static,
{
    let category = state.manage().create_category(req.name, req.slug).await?;
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}
