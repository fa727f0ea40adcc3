use std::collections::HashMap;

use kernel::id::{ProductId, SizeId, TeamId, VariantId};
use rust_decimal::Decimal;

/// Stored cart row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    pub variant_id: VariantId,
    pub size_id: SizeId,
    pub quantity: i32,
}

/// Cart row joined with the catalog at read time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub variant_id: VariantId,
    pub size_id: SizeId,
    pub product_id: ProductId,
    pub team_id: TeamId,
    pub product_name: String,
    pub product_slug: String,
    pub variant_name: String,
    pub size_label: String,
    /// Variant price, or the product base price when the variant has none
    pub unit_price: Decimal,
    pub quantity: i32,
    pub stock: i32,
    pub is_active: bool,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }

    pub fn is_available(&self) -> bool {
        self.is_active && self.stock >= self.quantity
    }

    /// Human-readable name used in stock errors
    pub fn display_name(&self) -> String {
        format!(
            "{} ({}, {})",
            self.product_name, self.variant_name, self.size_label
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub subtotal: Decimal,
}

impl CartView {
    pub fn new(lines: Vec<CartLine>) -> Self {
        let subtotal = lines.iter().map(CartLine::line_total).sum();
        Self { lines, subtotal }
    }

    pub fn item_count(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

/// Stock and sellability of one size of a variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeStock {
    pub stock: i32,
    pub is_active: bool,
}

/// Quantity after adding `requested` to `current`, never above stock
pub fn capped_quantity(current: i32, requested: i32, stock: i32) -> i32 {
    current.saturating_add(requested).min(stock).max(0)
}

/// Rows to upsert into the user cart when a guest cart is merged into it.
///
/// Quantities add up, capped at stock and at `max_line_quantity` like
/// [`capped_quantity`] in add-to-cart. Lines whose size is gone (`stock_of`
/// returns `None`), belongs to an inactive product, or has no stock left are
/// dropped.
pub fn merge_lines<F>(
    user: &[CartItem],
    guest: &[CartItem],
    max_line_quantity: i32,
    stock_of: F,
) -> Vec<CartItem>
where
    F: Fn(SizeId) -> Option<SizeStock>,
{
    let existing: HashMap<(VariantId, SizeId), i32> = user
        .iter()
        .map(|i| ((i.variant_id, i.size_id), i.quantity))
        .collect();

    guest
        .iter()
        .filter_map(|g| {
            let size = stock_of(g.size_id).filter(|s| s.is_active)?;
            let current = existing
                .get(&(g.variant_id, g.size_id))
                .copied()
                .unwrap_or(0);
            let quantity =
                capped_quantity(current, g.quantity, size.stock).min(max_line_quantity);
            (quantity > 0).then_some(CartItem {
                variant_id: g.variant_id,
                size_id: g.size_id,
                quantity,
            })
        })
        .collect()
}
