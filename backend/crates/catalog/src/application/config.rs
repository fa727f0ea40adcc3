//! Application Configuration

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Upper bound on images attached to one product
    pub max_images_per_product: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_images_per_product: 12,
        }
    }
}

impl CatalogConfig {
    pub fn development() -> Self {
        Self::default()
    }
}
