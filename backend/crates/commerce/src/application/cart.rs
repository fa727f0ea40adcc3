//! Cart use cases

use std::sync::Arc;

use auth::{CartMerger, CartOwner};
use kernel::error::app_error::AppResult;
use kernel::id::{GuestSessionId, SizeId, UserId, VariantId};

use crate::application::config::CommerceConfig;
use crate::domain::entity::cart::{CartItem, CartView, SizeStock, capped_quantity};
use crate::domain::repository::CartRepository;
use crate::error::{CommerceError, CommerceResult};

pub struct CartUseCase<R>
where
    R: CartRepository,
{
    repo: Arc<R>,
    config: Arc<CommerceConfig>,
}

impl<R> CartUseCase<R>
where
    R: CartRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CommerceConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn view(&self, owner: &CartOwner) -> CommerceResult<CartView> {
        Ok(CartView::new(self.repo.cart_lines(owner).await?))
    }

    /// Add to an existing line; the result is capped at stock
    pub async fn add_item(
        &self,
        owner: &CartOwner,
        variant_id: VariantId,
        size_id: SizeId,
        quantity: i32,
    ) -> CommerceResult<CartView> {
        self.check_quantity(quantity, 1)?;
        let stock = self.sellable(&variant_id, &size_id).await?;

        let current = self
            .repo
            .item_quantity(owner, &variant_id, &size_id)
            .await?;
        let quantity = capped_quantity(current, quantity, stock.stock)
            .min(self.config.max_line_quantity);

        self.repo
            .put_item(
                owner,
                &CartItem {
                    variant_id,
                    size_id,
                    quantity,
                },
            )
            .await?;
        self.view(owner).await
    }

    /// Set a line's quantity; 0 removes the line
    pub async fn update_item(
        &self,
        owner: &CartOwner,
        variant_id: VariantId,
        size_id: SizeId,
        quantity: i32,
    ) -> CommerceResult<CartView> {
        self.check_quantity(quantity, 0)?;
        if quantity == 0 {
            self.repo.remove_item(owner, &variant_id, &size_id).await?;
            return self.view(owner).await;
        }

        let stock = self.sellable(&variant_id, &size_id).await?;
        self.repo
            .put_item(
                owner,
                &CartItem {
                    variant_id,
                    size_id,
                    quantity: capped_quantity(0, quantity, stock.stock),
                },
            )
            .await?;
        self.view(owner).await
    }

    pub async fn remove_item(
        &self,
        owner: &CartOwner,
        variant_id: VariantId,
        size_id: SizeId,
    ) -> CommerceResult<CartView> {
        self.repo.remove_item(owner, &variant_id, &size_id).await?;
        self.view(owner).await
    }

    pub async fn clear(&self, owner: &CartOwner) -> CommerceResult<()> {
        self.repo.clear_cart(owner).await
    }

    fn check_quantity(&self, quantity: i32, min: i32) -> CommerceResult<()> {
        if quantity < min || quantity > self.config.max_line_quantity {
            return Err(CommerceError::Validation(format!(
                "Quantity must be between {} and {}",
                min, self.config.max_line_quantity
            )));
        }
        Ok(())
    }

    /// Size of an active product with at least one unit left
    async fn sellable(&self, variant_id: &VariantId, size_id: &SizeId) -> CommerceResult<SizeStock> {
        let stock = self
            .repo
            .size_stock(variant_id, size_id)
            .await?
            .ok_or(CommerceError::SizeNotFound)?;
        if !stock.is_active {
            return Err(CommerceError::ProductNotFound);
        }
        if stock.stock <= 0 {
            return Err(CommerceError::OutOfStock {
                item: "Selected size".to_string(),
            });
        }
        Ok(stock)
    }
}

// ============================================================================
// Guest cart merge
// ============================================================================

/// `auth::CartMerger` backed by the commerce cart store
#[derive(Clone)]
pub struct CartMergeService<R>
where
    R: CartRepository,
{
    repo: Arc<R>,
    max_line_quantity: i32,
}

impl<R> CartMergeService<R>
where
    R: CartRepository,
{
    pub fn new(repo: Arc<R>, config: &CommerceConfig) -> Self {
        Self {
            repo,
            max_line_quantity: config.max_line_quantity,
        }
    }
}

impl<R> CartMerger for CartMergeService<R>
where
    R: CartRepository + Send + Sync,
{
    async fn merge_guest_cart(
        &self,
        guest_session_id: GuestSessionId,
        user_id: UserId,
    ) -> AppResult<usize> {
        let merged = self
            .repo
            .merge_guest_cart(&guest_session_id, &user_id, self.max_line_quantity)
            .await
            .map_err(|e| e.to_app_error())?;
        if merged > 0 {
            tracing::info!(user_id = %user_id, lines = merged, "Guest cart merged");
        }
        Ok(merged)
    }
}
