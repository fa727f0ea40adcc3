use kernel::id::{ImageId, ProductId, VariantId};

use crate::error::{CatalogError, CatalogResult};

/// Product image, optionally tied to one variant. Lowest `position` is primary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub image_id: ImageId,
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub url: String,
    pub position: i32,
}

impl Image {
    pub fn new(
        product_id: ProductId,
        variant_id: Option<VariantId>,
        url: String,
        position: i32,
    ) -> CatalogResult<Self> {
        let url = url.trim().to_string();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(CatalogError::Validation(
                "Image URL must be http(s)".to_string(),
            ));
        }
        if position < 0 {
            return Err(CatalogError::Validation(
                "Image position must not be negative".to_string(),
            ));
        }
        Ok(Self {
            image_id: ImageId::new(),
            product_id,
            variant_id,
            url,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_validation() {
        let product = ProductId::new();
        assert!(Image::new(product, None, " https://cdn.example.com/a.jpg ".into(), 0).is_ok());
        assert!(Image::new(product, None, "ftp://x/a.jpg".into(), 0).is_err());
        assert!(Image::new(product, None, "https://cdn.example.com/a.jpg".into(), -1).is_err());
    }
}
