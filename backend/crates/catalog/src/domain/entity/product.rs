use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, ProductId, TeamId};
use rust_decimal::Decimal;

use crate::domain::entity::category::Category;
use crate::domain::entity::image::Image;
use crate::domain::entity::variant::VariantDetail;
use crate::domain::value_object::price::Price;
use crate::domain::value_object::product_sort::ProductSort;

/// Product owned by a team
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub product_id: ProductId,
    pub team_id: TeamId,
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub base_price: Price,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` leaves the field as is
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub category_id: Option<CategoryId>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<Price>,
    pub is_active: Option<bool>,
}

impl Product {
    pub fn new(
        team_id: TeamId,
        category_id: Option<CategoryId>,
        name: String,
        slug: String,
        description: String,
        base_price: Price,
    ) -> Self {
        let now = Utc::now();
        Self {
            product_id: ProductId::new(),
            team_id,
            category_id,
            name: name.trim().to_string(),
            slug,
            description: description.trim().to_string(),
            base_price,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether anything changed
    pub fn apply(&mut self, patch: ProductPatch) -> bool {
        let mut changed = false;

        if let Some(category_id) = patch.category_id {
            changed |= self.category_id != Some(category_id);
            self.category_id = Some(category_id);
        }
        if let Some(name) = patch.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()) {
            changed |= self.name != name;
            self.name = name;
        }
        if let Some(slug) = patch.slug {
            changed |= self.slug != slug;
            self.slug = slug;
        }
        if let Some(description) = patch.description {
            let description = description.trim().to_string();
            changed |= self.description != description;
            self.description = description;
        }
        if let Some(price) = patch.base_price {
            changed |= self.base_price != price;
            self.base_price = price;
        }
        if let Some(active) = patch.is_active {
            changed |= self.is_active != active;
            self.is_active = active;
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

// ============================================================================
// Read models
// ============================================================================

/// Listing filter; slugs for category and team
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub team: Option<String>,
    pub q: Option<String>,
    pub sort: ProductSort,
}

/// One row of the public listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub team_id: TeamId,
    pub name: String,
    pub slug: String,
    pub category_slug: Option<String>,
    /// Lowest effective price across variants, base price without variants
    pub min_price: Decimal,
    pub primary_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub product: Product,
    pub category: Option<Category>,
    pub variants: Vec<VariantDetail>,
    pub images: Vec<Image>,
}
