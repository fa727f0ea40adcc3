//! Team-scoped catalog administration

use std::sync::Arc;

use auth::CurrentUser;
use kernel::id::{CategoryId, ProductId, SizeId, TeamId, VariantId};
use rust_decimal::Decimal;

use crate::application::config::CatalogConfig;
use crate::domain::entity::category::Category;
use crate::domain::entity::image::Image;
use crate::domain::entity::product::{Product, ProductPatch};
use crate::domain::entity::variant::{Size, Variant, validate_stock};
use crate::domain::repository::{CatalogTarget, CategoryRepository, ProductRepository, TeamAccess};
use crate::domain::value_object::price::Price;
use crate::error::{CatalogError, CatalogResult};

/// Input for a new product
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub team_id: TeamId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub base_price: Decimal,
}

pub struct ManageCatalogUseCase<R>
where
    R: ProductRepository + CategoryRepository + TeamAccess,
{
    repo: Arc<R>,
    config: Arc<CatalogConfig>,
}

impl<R> ManageCatalogUseCase<R>
where
    R: ProductRepository + CategoryRepository + TeamAccess,
{
    pub fn new(repo: Arc<R>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn create_product(
        &self,
        actor: &CurrentUser,
        input: NewProduct,
    ) -> CatalogResult<Product> {
        self.authorize(actor, &input.team_id).await?;

        let product = Product::new(
            input.team_id,
            input.category_id,
            input.name,
            input.slug,
            input.description,
            Price::new(input.base_price)?,
        );
        self.repo.insert_product(&product).await?;

        tracing::info!(
            product_id = %product.product_id,
            team_id = %product.team_id,
            slug = %product.slug,
            "Product created"
        );
        Ok(product)
    }

    pub async fn update_product(
        &self,
        actor: &CurrentUser,
        product_id: &ProductId,
        patch: ProductPatch,
    ) -> CatalogResult<Product> {
        let mut product = self.product_for_write(actor, product_id).await?;

        if product.apply(patch) && !self.repo.update_product(&product).await? {
            return Err(CatalogError::ProductNotFound);
        }
        Ok(product)
    }

    /// Soft delete; orders keep referencing the rows
    pub async fn deactivate_product(
        &self,
        actor: &CurrentUser,
        product_id: &ProductId,
    ) -> CatalogResult<()> {
        let mut product = self.product_for_write(actor, product_id).await?;

        let patch = ProductPatch {
            is_active: Some(false),
            ..Default::default()
        };
        if product.apply(patch) {
            self.repo.update_product(&product).await?;
            tracing::info!(product_id = %product_id, "Product deactivated");
        }
        Ok(())
    }

    pub async fn add_variant(
        &self,
        actor: &CurrentUser,
        product_id: &ProductId,
        name: String,
        sku: String,
        price: Option<Decimal>,
    ) -> CatalogResult<Variant> {
        self.authorize_target(actor, CatalogTarget::Product(*product_id))
            .await?;

        let price = price.map(Price::new).transpose()?;
        let variant = Variant::new(*product_id, name, sku, price);
        self.repo.insert_variant(&variant).await?;

        tracing::info!(variant_id = %variant.variant_id, sku = %variant.sku, "Variant created");
        Ok(variant)
    }

    pub async fn add_size(
        &self,
        actor: &CurrentUser,
        variant_id: &VariantId,
        label: String,
        stock: i32,
    ) -> CatalogResult<Size> {
        self.authorize_target(actor, CatalogTarget::Variant(*variant_id))
            .await?;

        let size = Size::new(*variant_id, label, stock)?;
        self.repo.insert_size(&size).await?;
        Ok(size)
    }

    pub async fn set_stock(
        &self,
        actor: &CurrentUser,
        size_id: &SizeId,
        stock: i32,
    ) -> CatalogResult<Size> {
        let stock = validate_stock(stock)?;
        self.authorize_target(actor, CatalogTarget::Size(*size_id))
            .await?;

        let size = self
            .repo
            .set_stock(size_id, stock)
            .await?
            .ok_or(CatalogError::SizeNotFound)?;

        tracing::info!(size_id = %size_id, stock = stock, "Stock updated");
        Ok(size)
    }

    pub async fn add_image(
        &self,
        actor: &CurrentUser,
        product_id: &ProductId,
        url: String,
        variant_id: Option<VariantId>,
        position: i32,
    ) -> CatalogResult<Image> {
        self.authorize_target(actor, CatalogTarget::Product(*product_id))
            .await?;

        if let Some(variant_id) = variant_id {
            let belongs = self
                .repo
                .find_variant(&variant_id)
                .await?
                .is_some_and(|v| &v.product_id == product_id);
            if !belongs {
                return Err(CatalogError::VariantNotFound);
            }
        }

        let count = self.repo.count_images(product_id).await?;
        if count >= self.config.max_images_per_product as i64 {
            return Err(CatalogError::Validation(format!(
                "A product can have at most {} images",
                self.config.max_images_per_product
            )));
        }

        let image = Image::new(*product_id, variant_id, url, position)?;
        self.repo.insert_image(&image).await?;
        Ok(image)
    }

    /// Global admins only; the handler enforces the role
    pub async fn create_category(&self, name: String, slug: String) -> CatalogResult<Category> {
        let category = Category::new(name, slug);
        self.repo.insert_category(&category).await?;

        tracing::info!(category_id = %category.category_id, slug = %category.slug, "Category created");
        Ok(category)
    }

    // ========================================================================
    // Authorization
    // ========================================================================

    async fn product_for_write(
        &self,
        actor: &CurrentUser,
        product_id: &ProductId,
    ) -> CatalogResult<Product> {
        let product = self
            .repo
            .find_product(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)?;
        self.authorize(actor, &product.team_id).await?;
        Ok(product)
    }

    async fn authorize_target(&self, actor: &CurrentUser, target: CatalogTarget) -> CatalogResult<()> {
        let team_id = self.repo.owning_team(target).await?.ok_or(match target {
            CatalogTarget::Product(_) => CatalogError::ProductNotFound,
            CatalogTarget::Variant(_) => CatalogError::VariantNotFound,
            CatalogTarget::Size(_) => CatalogError::SizeNotFound,
        })?;
        self.authorize(actor, &team_id).await
    }

    /// Team owners and admins, or any global admin
    async fn authorize(&self, actor: &CurrentUser, team_id: &TeamId) -> CatalogResult<()> {
        if actor.is_admin() {
            return if self.repo.team_exists(team_id).await? {
                Ok(())
            } else {
                Err(CatalogError::TeamNotFound)
            };
        }

        match self.repo.team_role(team_id, &actor.user_id).await? {
            Some(role) if role.can_manage() => Ok(()),
            _ => Err(CatalogError::Forbidden),
        }
    }
}
