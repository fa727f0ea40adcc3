//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use account::TeamRole;
use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, ProductId, SizeId, TeamId, UserId, VariantId};
use kernel::pagination::{Page, PageParams};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::category::Category;
use crate::domain::entity::image::Image;
use crate::domain::entity::product::{Product, ProductDetail, ProductFilter, ProductSummary};
use crate::domain::entity::variant::{Size, Variant, VariantDetail};
use crate::domain::repository::{CatalogTarget, CategoryRepository, ProductRepository, TeamAccess};
use crate::domain::value_object::price::Price;
use crate::domain::value_object::product_sort::ProductSort;
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed catalog repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PRODUCT_COLUMNS: &str = r#"
    product_id,
    team_id,
    category_id,
    name,
    slug,
    description,
    base_price,
    is_active,
    created_at,
    updated_at
"#;

/// Active products joined with category and team, filtered by
/// `$1` category slug, `$2` team slug and `$3` name/description pattern
const LISTING_FROM: &str = r#"
    FROM products p
    JOIN teams t ON t.team_id = p.team_id
    LEFT JOIN categories c ON c.category_id = p.category_id
    WHERE p.is_active
      AND ($1::text IS NULL OR c.slug = $1)
      AND ($2::text IS NULL OR t.slug = $2)
      AND ($3::text IS NULL OR p.name ILIKE $3 OR p.description ILIKE $3)
"#;

fn order_by(sort: ProductSort) -> &'static str {
    match sort {
        ProductSort::Newest => "created_at DESC, product_id",
        ProductSort::PriceAsc => "min_price ASC, created_at DESC",
        ProductSort::PriceDesc => "min_price DESC, created_at DESC",
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgCatalogRepository {
    async fn list_products(
        &self,
        filter: &ProductFilter,
        params: &PageParams,
    ) -> CatalogResult<Page<ProductSummary>> {
        let pattern = filter
            .q
            .as_ref()
            .map(|q| format!("%{}%", q.replace('%', "\\%").replace('_', "\\_")));

        let total = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) {}", LISTING_FROM))
            .bind(&filter.category)
            .bind(&filter.team)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, SummaryRow>(&format!(
            r#"
            SELECT * FROM (
                SELECT
                    p.product_id,
                    p.team_id,
                    p.name,
                    p.slug,
                    c.slug AS category_slug,
                    p.created_at,
                    COALESCE(
                        (SELECT MIN(COALESCE(v.price, p.base_price))
                         FROM product_variants v WHERE v.product_id = p.product_id),
                        p.base_price
                    ) AS min_price,
                    (SELECT i.url FROM product_images i
                     WHERE i.product_id = p.product_id
                     ORDER BY i.position, i.image_id
                     LIMIT 1) AS primary_image
                {}
            ) listing
            ORDER BY {}
            LIMIT $4 OFFSET $5
            "#,
            LISTING_FROM,
            order_by(filter.sort)
        ))
        .bind(&filter.category)
        .bind(&filter.team)
        .bind(&pattern)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        let items = rows.into_iter().map(SummaryRow::into_summary).collect();
        Ok(Page::new(items, params, total))
    }

    async fn find_detail_by_slug(&self, slug: &str) -> CatalogResult<Option<ProductDetail>> {
        let Some(product) = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE slug = $1",
            PRODUCT_COLUMNS
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?
        .map(ProductRow::into_product) else {
            return Ok(None);
        };

        let category = match product.category_id {
            Some(category_id) => sqlx::query_as::<_, CategoryRow>(
                "SELECT category_id, name, slug FROM categories WHERE category_id = $1",
            )
            .bind(category_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?
            .map(CategoryRow::into_category),
            None => None,
        };

        let variants = sqlx::query_as::<_, VariantRow>(
            r#"
            SELECT variant_id, product_id, name, sku, price
            FROM product_variants
            WHERE product_id = $1
            ORDER BY name, sku
            "#,
        )
        .bind(product.product_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let variant_ids: Vec<Uuid> = variants.iter().map(|v| v.variant_id).collect();
        let sizes = sqlx::query_as::<_, SizeRow>(
            r#"
            SELECT size_id, variant_id, label, stock
            FROM product_sizes
            WHERE variant_id = ANY($1)
            ORDER BY label
            "#,
        )
        .bind(&variant_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut sizes_by_variant: HashMap<Uuid, Vec<Size>> = HashMap::new();
        for row in sizes {
            sizes_by_variant
                .entry(row.variant_id)
                .or_default()
                .push(row.into_size());
        }

        let variants = variants
            .into_iter()
            .map(|row| {
                let sizes = sizes_by_variant.remove(&row.variant_id).unwrap_or_default();
                let variant = row.into_variant();
                VariantDetail {
                    effective_price: variant.effective_price(product.base_price).amount(),
                    variant,
                    sizes,
                }
            })
            .collect();

        let images = sqlx::query_as::<_, ImageRow>(
            r#"
            SELECT image_id, product_id, variant_id, url, position
            FROM product_images
            WHERE product_id = $1
            ORDER BY position, image_id
            "#,
        )
        .bind(product.product_id.as_uuid())
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(ImageRow::into_image)
        .collect();

        Ok(Some(ProductDetail {
            product,
            category,
            variants,
            images,
        }))
    }

    async fn find_product(&self, product_id: &ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE product_id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn insert_product(&self, product: &Product) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                product_id, team_id, category_id, name, slug, description,
                base_price, is_active, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(product.team_id.as_uuid())
        .bind(product.category_id.map(|c| c.into_uuid()))
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.base_price.amount())
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(product_write_error)?;

        Ok(())
    }

    async fn update_product(&self, product: &Product) -> CatalogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET category_id = $2, name = $3, slug = $4, description = $5,
                base_price = $6, is_active = $7, updated_at = $8
            WHERE product_id = $1
            "#,
        )
        .bind(product.product_id.as_uuid())
        .bind(product.category_id.map(|c| c.into_uuid()))
        .bind(&product.name)
        .bind(&product.slug)
        .bind(&product.description)
        .bind(product.base_price.amount())
        .bind(product.is_active)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(product_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_variant(&self, variant_id: &VariantId) -> CatalogResult<Option<Variant>> {
        let row = sqlx::query_as::<_, VariantRow>(
            "SELECT variant_id, product_id, name, sku, price FROM product_variants WHERE variant_id = $1",
        )
        .bind(variant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(VariantRow::into_variant))
    }

    async fn insert_variant(&self, variant: &Variant) -> CatalogResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO product_variants (variant_id, product_id, name, sku, price)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(variant.variant_id.as_uuid())
        .bind(variant.product_id.as_uuid())
        .bind(&variant.name)
        .bind(&variant.sku)
        .bind(variant.price.map(|p| p.amount()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(CatalogError::SkuTaken)
            }
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(CatalogError::ProductNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn insert_size(&self, size: &Size) -> CatalogResult<()> {
        let result = sqlx::query(
            "INSERT INTO product_sizes (size_id, variant_id, label, stock) VALUES ($1, $2, $3, $4)",
        )
        .bind(size.size_id.as_uuid())
        .bind(size.variant_id.as_uuid())
        .bind(&size.label)
        .bind(size.stock)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(CatalogError::VariantNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn set_stock(&self, size_id: &SizeId, stock: i32) -> CatalogResult<Option<Size>> {
        let row = sqlx::query_as::<_, SizeRow>(
            r#"
            UPDATE product_sizes SET stock = $2
            WHERE size_id = $1
            RETURNING size_id, variant_id, label, stock
            "#,
        )
        .bind(size_id.as_uuid())
        .bind(stock)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(SizeRow::into_size))
    }

    async fn count_images(&self, product_id: &ProductId) -> CatalogResult<i64> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM product_images WHERE product_id = $1")
                .bind(product_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    async fn insert_image(&self, image: &Image) -> CatalogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO product_images (image_id, product_id, variant_id, url, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(image.image_id.as_uuid())
        .bind(image.product_id.as_uuid())
        .bind(image.variant_id.map(|v| v.into_uuid()))
        .bind(&image.url)
        .bind(image.position)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn owning_team(&self, target: CatalogTarget) -> CatalogResult<Option<TeamId>> {
        let (sql, id) = match target {
            CatalogTarget::Product(id) => (
                "SELECT team_id FROM products WHERE product_id = $1",
                id.into_uuid(),
            ),
            CatalogTarget::Variant(id) => (
                r#"
                SELECT p.team_id FROM product_variants v
                JOIN products p ON p.product_id = v.product_id
                WHERE v.variant_id = $1
                "#,
                id.into_uuid(),
            ),
            CatalogTarget::Size(id) => (
                r#"
                SELECT p.team_id FROM product_sizes s
                JOIN product_variants v ON v.variant_id = s.variant_id
                JOIN products p ON p.product_id = v.product_id
                WHERE s.size_id = $1
                "#,
                id.into_uuid(),
            ),
        };

        let team_id = sqlx::query_scalar::<_, Uuid>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(team_id.map(TeamId::from_uuid))
    }
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgCatalogRepository {
    async fn list_categories(&self) -> CatalogResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT category_id, name, slug FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn insert_category(&self, category: &Category) -> CatalogResult<()> {
        let result = sqlx::query("INSERT INTO categories (category_id, name, slug) VALUES ($1, $2, $3)")
            .bind(category.category_id.as_uuid())
            .bind(&category.name)
            .bind(&category.slug)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(CatalogError::SlugTaken)
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Team Access Implementation
// ============================================================================

impl TeamAccess for PgCatalogRepository {
    async fn team_exists(&self, team_id: &TeamId) -> CatalogResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM teams WHERE team_id = $1)")
                .bind(team_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn team_role(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> CatalogResult<Option<TeamRole>> {
        let code = sqlx::query_scalar::<_, String>(
            "SELECT team_role FROM team_members WHERE team_id = $1 AND user_id = $2",
        )
        .bind(team_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        code.map(|c| {
            TeamRole::from_code(&c)
                .ok_or_else(|| CatalogError::Internal(format!("Unknown team role in database: {}", c)))
        })
        .transpose()
    }
}

/// Product inserts and updates: slug clash or a dangling category/team
fn product_write_error(err: sqlx::Error) -> CatalogError {
    match err {
        sqlx::Error::Database(db) if db.is_unique_violation() => CatalogError::SlugTaken,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            if db.constraint() == Some("products_category_id_fkey") {
                CatalogError::CategoryNotFound
            } else {
                CatalogError::TeamNotFound
            }
        }
        e => CatalogError::Database(e),
    }
}

// ============================================================================
// Rows
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    product_id: Uuid,
    team_id: Uuid,
    category_id: Option<Uuid>,
    name: String,
    slug: String,
    description: String,
    base_price: Decimal,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            product_id: ProductId::from_uuid(self.product_id),
            team_id: TeamId::from_uuid(self.team_id),
            category_id: self.category_id.map(CategoryId::from_uuid),
            name: self.name,
            slug: self.slug,
            description: self.description,
            base_price: Price::from_db(self.base_price),
            is_active: self.is_active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    product_id: Uuid,
    team_id: Uuid,
    name: String,
    slug: String,
    category_slug: Option<String>,
    created_at: DateTime<Utc>,
    min_price: Decimal,
    primary_image: Option<String>,
}

impl SummaryRow {
    fn into_summary(self) -> ProductSummary {
        ProductSummary {
            product_id: ProductId::from_uuid(self.product_id),
            team_id: TeamId::from_uuid(self.team_id),
            name: self.name,
            slug: self.slug,
            category_slug: self.category_slug,
            min_price: self.min_price,
            primary_image: self.primary_image,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VariantRow {
    variant_id: Uuid,
    product_id: Uuid,
    name: String,
    sku: String,
    price: Option<Decimal>,
}

impl VariantRow {
    fn into_variant(self) -> Variant {
        Variant {
            variant_id: VariantId::from_uuid(self.variant_id),
            product_id: ProductId::from_uuid(self.product_id),
            name: self.name,
            sku: self.sku,
            price: self.price.map(Price::from_db),
        }
    }
}

#[derive(sqlx::FromRow)]
struct SizeRow {
    size_id: Uuid,
    variant_id: Uuid,
    label: String,
    stock: i32,
}

impl SizeRow {
    fn into_size(self) -> Size {
        Size {
            size_id: SizeId::from_uuid(self.size_id),
            variant_id: VariantId::from_uuid(self.variant_id),
            label: self.label,
            stock: self.stock,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ImageRow {
    image_id: Uuid,
    product_id: Uuid,
    variant_id: Option<Uuid>,
    url: String,
    position: i32,
}

impl ImageRow {
    fn into_image(self) -> Image {
        Image {
            image_id: kernel::id::ImageId::from_uuid(self.image_id),
            product_id: ProductId::from_uuid(self.product_id),
            variant_id: self.variant_id.map(VariantId::from_uuid),
            url: self.url,
            position: self.position,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    category_id: Uuid,
    name: String,
    slug: String,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            category_id: CategoryId::from_uuid(self.category_id),
            name: self.name,
            slug: self.slug,
        }
    }
}
