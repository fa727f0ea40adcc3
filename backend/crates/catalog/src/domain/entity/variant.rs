use kernel::id::{ProductId, SizeId, VariantId};
use rust_decimal::Decimal;

use crate::domain::value_object::price::Price;
use crate::error::{CatalogError, CatalogResult};

/// Sellable variant of a product. `price: None` means the product's base price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub variant_id: VariantId,
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: Option<Price>,
}

impl Variant {
    pub fn new(product_id: ProductId, name: String, sku: String, price: Option<Price>) -> Self {
        Self {
            variant_id: VariantId::new(),
            product_id,
            name: name.trim().to_string(),
            sku: sku.trim().to_uppercase(),
            price,
        }
    }

    pub fn effective_price(&self, base_price: Price) -> Price {
        self.price.unwrap_or(base_price)
    }
}

/// Stock-keeping size of a variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    pub size_id: SizeId,
    pub variant_id: VariantId,
    pub label: String,
    pub stock: i32,
}

impl Size {
    pub fn new(variant_id: VariantId, label: String, stock: i32) -> CatalogResult<Self> {
        Ok(Self {
            size_id: SizeId::new(),
            variant_id,
            label: label.trim().to_string(),
            stock: validate_stock(stock)?,
        })
    }

    pub fn is_available(&self, quantity: i32) -> bool {
        self.stock >= quantity
    }
}

pub fn validate_stock(stock: i32) -> CatalogResult<i32> {
    if stock < 0 {
        return Err(CatalogError::Validation(
            "Stock must not be negative".to_string(),
        ));
    }
    Ok(stock)
}

/// Variant with its sizes and resolved price, as shown on the product page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantDetail {
    pub variant: Variant,
    pub effective_price: Decimal,
    pub sizes: Vec<Size>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_falls_back_to_base() {
        let base = Price::new(Decimal::new(100_000, 0)).unwrap();
        let own = Price::new(Decimal::new(125_000, 0)).unwrap();

        let plain = Variant::new(ProductId::new(), "Navy".into(), "bt-01-navy".into(), None);
        assert_eq!(plain.effective_price(base), base);
        assert_eq!(plain.sku, "BT-01-NAVY");

        let priced = Variant::new(ProductId::new(), "Gold".into(), "BT-01-GOLD".into(), Some(own));
        assert_eq!(priced.effective_price(base), own);
    }

    #[test]
    fn test_size_stock() {
        let size = Size::new(VariantId::new(), " XL ".into(), 3).unwrap();
        assert_eq!(size.label, "XL");
        assert!(size.is_available(3));
        assert!(!size.is_available(4));
        assert!(Size::new(VariantId::new(), "S".into(), -1).is_err());
        assert_eq!(validate_stock(0).unwrap(), 0);
    }
}
