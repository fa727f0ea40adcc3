//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use auth::CartOwner;
use chrono::{DateTime, Utc};
use kernel::id::{
    AddressId, CartId, GuestSessionId, OrderId, ProductId, ResellerId, SizeId, TeamId, UserId,
    VariantId,
};
use kernel::pagination::{Page, PageParams};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::cart::{CartItem, CartLine, SizeStock, merge_lines};
use crate::domain::entity::order::{
    Order, OrderDraft, OrderItem, ShippingAddress, StatusChange,
};
use crate::domain::repository::{AddressBook, CartRepository, OrderRepository};
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::{CommerceError, CommerceResult};

/// PostgreSQL-backed cart and order repository
#[derive(Clone)]
pub struct PgCommerceRepository {
    pool: PgPool,
}

impl PgCommerceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Cart rows joined with the catalog; callers append the owner filter
const CART_LINES_SELECT: &str = r#"
    SELECT
        ci.variant_id,
        ci.size_id,
        ci.quantity,
        p.product_id,
        p.team_id,
        p.name AS product_name,
        p.slug AS product_slug,
        p.is_active,
        v.name AS variant_name,
        s.label AS size_label,
        s.stock,
        COALESCE(v.price, p.base_price) AS unit_price
    FROM carts c
    JOIN cart_items ci ON ci.cart_id = c.cart_id
    JOIN product_variants v ON v.variant_id = ci.variant_id
    JOIN product_sizes s ON s.size_id = ci.size_id AND s.variant_id = ci.variant_id
    JOIN products p ON p.product_id = v.product_id
"#;

const ORDER_COLUMNS: &str = r#"
    order_id,
    order_code,
    user_id,
    guest_session_id,
    guest_email,
    reseller_id,
    status,
    subtotal,
    shipping_fee,
    total,
    ship_recipient,
    ship_phone,
    ship_line1,
    ship_line2,
    ship_city,
    ship_province,
    ship_postal_code,
    payment_method,
    payment_reference,
    payment_action_url,
    tracking_number,
    created_at,
    updated_at,
    paid_at
"#;

const ITEM_COLUMNS: &str = r#"
    order_id,
    team_id,
    variant_id,
    size_id,
    product_name,
    variant_name,
    size_label,
    unit_price,
    quantity
"#;

/// Column identifying the cart owner in `carts`, with its key
fn owner_key(owner: &CartOwner) -> (&'static str, Uuid) {
    match owner {
        CartOwner::User(id) => ("user_id", id.into_uuid()),
        CartOwner::Guest(session) => ("guest_session_id", session.into_uuid()),
    }
}

// ============================================================================
// Transaction helpers
// ============================================================================

impl PgCommerceRepository {
    async fn ensure_cart(
        tx: &mut Transaction<'_, Postgres>,
        owner: &CartOwner,
    ) -> CommerceResult<Uuid> {
        let (column, key) = owner_key(owner);
        let cart_id = sqlx::query_scalar::<_, Uuid>(&format!(
            r#"
            INSERT INTO carts (cart_id, {column}, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT ({column}) DO UPDATE SET updated_at = now()
            RETURNING cart_id
            "#
        ))
        .bind(CartId::new().into_uuid())
        .bind(key)
        .fetch_one(&mut **tx)
        .await?;
        Ok(cart_id)
    }

    async fn upsert_item(
        tx: &mut Transaction<'_, Postgres>,
        cart_id: Uuid,
        item: &CartItem,
    ) -> CommerceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (cart_id, variant_id, size_id, quantity)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (cart_id, variant_id, size_id)
            DO UPDATE SET quantity = EXCLUDED.quantity
            "#,
        )
        .bind(cart_id)
        .bind(item.variant_id.as_uuid())
        .bind(item.size_id.as_uuid())
        .bind(item.quantity)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    async fn items_of_cart(
        tx: &mut Transaction<'_, Postgres>,
        cart_id: Uuid,
    ) -> CommerceResult<Vec<CartItem>> {
        let rows = sqlx::query_as::<_, CartItemRow>(
            "SELECT variant_id, size_id, quantity FROM cart_items WHERE cart_id = $1",
        )
        .bind(cart_id)
        .fetch_all(&mut **tx)
        .await?;
        Ok(rows.into_iter().map(CartItemRow::into_item).collect())
    }

    /// Put the items of an order back on the shelf, in size order
    async fn restock(
        tx: &mut Transaction<'_, Postgres>,
        items: &[OrderItem],
    ) -> CommerceResult<()> {
        let mut sorted: Vec<&OrderItem> = items.iter().collect();
        sorted.sort_by_key(|i| i.size_id.into_uuid());
        for item in sorted {
            sqlx::query("UPDATE product_sizes SET stock = stock + $2 WHERE size_id = $1")
                .bind(item.size_id.as_uuid())
                .bind(item.quantity)
                .execute(&mut **tx)
                .await?;
        }
        Ok(())
    }

    async fn load_items<'e, E>(
        executor: E,
        order_ids: &[Uuid],
    ) -> CommerceResult<HashMap<Uuid, Vec<OrderItem>>>
    where
        E: PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, OrderItemRow>(&format!(
            "SELECT {} FROM order_items WHERE order_id = ANY($1) ORDER BY product_name, size_label",
            ITEM_COLUMNS
        ))
        .bind(order_ids)
        .fetch_all(executor)
        .await?;

        let mut by_order: HashMap<Uuid, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            let order_id = row.order_id;
            by_order.entry(order_id).or_default().push(row.into_item());
        }
        Ok(by_order)
    }

    async fn with_items(&self, rows: Vec<OrderRow>) -> CommerceResult<Vec<Order>> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.order_id).collect();
        let mut items = Self::load_items(&self.pool, &ids).await?;
        rows.into_iter()
            .map(|row| {
                let order_items = items.remove(&row.order_id).unwrap_or_default();
                row.into_order(order_items)
            })
            .collect()
    }
}

// ============================================================================
// Cart Repository Implementation
// ============================================================================

impl CartRepository for PgCommerceRepository {
    async fn cart_lines(&self, owner: &CartOwner) -> CommerceResult<Vec<CartLine>> {
        let (column, key) = owner_key(owner);
        let rows = sqlx::query_as::<_, CartLineRow>(&format!(
            "{} WHERE c.{} = $1 ORDER BY p.name, v.name, s.label",
            CART_LINES_SELECT, column
        ))
        .bind(key)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CartLineRow::into_line).collect())
    }

    async fn size_stock(
        &self,
        variant_id: &VariantId,
        size_id: &SizeId,
    ) -> CommerceResult<Option<SizeStock>> {
        let row = sqlx::query_as::<_, (i32, bool)>(
            r#"
            SELECT s.stock, p.is_active
            FROM product_sizes s
            JOIN product_variants v ON v.variant_id = s.variant_id
            JOIN products p ON p.product_id = v.product_id
            WHERE s.size_id = $1 AND s.variant_id = $2
            "#,
        )
        .bind(size_id.as_uuid())
        .bind(variant_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(stock, is_active)| SizeStock { stock, is_active }))
    }

    async fn item_quantity(
        &self,
        owner: &CartOwner,
        variant_id: &VariantId,
        size_id: &SizeId,
    ) -> CommerceResult<i32> {
        let (column, key) = owner_key(owner);
        let quantity = sqlx::query_scalar::<_, i32>(&format!(
            r#"
            SELECT ci.quantity
            FROM cart_items ci
            JOIN carts c ON c.cart_id = ci.cart_id
            WHERE c.{column} = $1 AND ci.variant_id = $2 AND ci.size_id = $3
            "#
        ))
        .bind(key)
        .bind(variant_id.as_uuid())
        .bind(size_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(quantity.unwrap_or(0))
    }

    async fn put_item(&self, owner: &CartOwner, item: &CartItem) -> CommerceResult<()> {
        let mut tx = self.pool.begin().await?;
        let cart_id = Self::ensure_cart(&mut tx, owner).await?;
        Self::upsert_item(&mut tx, cart_id, item).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn remove_item(
        &self,
        owner: &CartOwner,
        variant_id: &VariantId,
        size_id: &SizeId,
    ) -> CommerceResult<bool> {
        let (column, key) = owner_key(owner);
        let result = sqlx::query(&format!(
            r#"
            DELETE FROM cart_items ci
            USING carts c
            WHERE ci.cart_id = c.cart_id
              AND c.{column} = $1 AND ci.variant_id = $2 AND ci.size_id = $3
            "#
        ))
        .bind(key)
        .bind(variant_id.as_uuid())
        .bind(size_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_cart(&self, owner: &CartOwner) -> CommerceResult<()> {
        let (column, key) = owner_key(owner);
        sqlx::query(&format!(
            "DELETE FROM cart_items ci USING carts c WHERE ci.cart_id = c.cart_id AND c.{column} = $1"
        ))
        .bind(key)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn merge_guest_cart(
        &self,
        guest_session_id: &GuestSessionId,
        user_id: &UserId,
        max_line_quantity: i32,
    ) -> CommerceResult<usize> {
        let mut tx = self.pool.begin().await?;

        let guest_cart = sqlx::query_scalar::<_, Uuid>(
            "SELECT cart_id FROM carts WHERE guest_session_id = $1 FOR UPDATE",
        )
        .bind(guest_session_id.as_uuid())
        .fetch_optional(&mut *tx)
        .await?;
        let Some(guest_cart) = guest_cart else {
            return Ok(0);
        };

        let guest_items = Self::items_of_cart(&mut tx, guest_cart).await?;
        let user_cart = Self::ensure_cart(&mut tx, &CartOwner::User(*user_id)).await?;
        let user_items = Self::items_of_cart(&mut tx, user_cart).await?;

        let size_ids: Vec<Uuid> = guest_items.iter().map(|i| i.size_id.into_uuid()).collect();
        let stock: HashMap<Uuid, SizeStock> = sqlx::query_as::<_, (Uuid, i32, bool)>(
            r#"
            SELECT s.size_id, s.stock, p.is_active
            FROM product_sizes s
            JOIN product_variants v ON v.variant_id = s.variant_id
            JOIN products p ON p.product_id = v.product_id
            WHERE s.size_id = ANY($1)
            "#,
        )
        .bind(&size_ids)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|(size_id, stock, is_active)| (size_id, SizeStock { stock, is_active }))
        .collect();

        let merged = merge_lines(&user_items, &guest_items, max_line_quantity, |size_id| {
            stock.get(&size_id.into_uuid()).copied()
        });
        for item in &merged {
            Self::upsert_item(&mut tx, user_cart, item).await?;
        }

        sqlx::query("DELETE FROM carts WHERE cart_id = $1")
            .bind(guest_cart)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(merged.len())
    }
}

// ============================================================================
// Order Repository Implementation
// ============================================================================

impl OrderRepository for PgCommerceRepository {
    async fn place_order(&self, draft: OrderDraft) -> CommerceResult<Order> {
        let mut tx = self.pool.begin().await?;
        let (column, key) = owner_key(&draft.owner);

        // Size rows stay locked until commit
        let lines: Vec<CartLine> = sqlx::query_as::<_, CartLineRow>(&format!(
            "{} WHERE c.{} = $1 ORDER BY s.size_id FOR UPDATE OF s",
            CART_LINES_SELECT, column
        ))
        .bind(key)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(CartLineRow::into_line)
        .collect();

        let order = draft.into_order(&lines)?;

        for item in &order.items {
            sqlx::query("UPDATE product_sizes SET stock = stock - $2 WHERE size_id = $1")
                .bind(item.size_id.as_uuid())
                .bind(item.quantity)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(&format!(
            r#"
            INSERT INTO orders ({})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                    $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24)
            "#,
            ORDER_COLUMNS
        ))
        .bind(order.order_id.as_uuid())
        .bind(&order.order_code)
        .bind(order.user_id.map(|u| u.into_uuid()))
        .bind(order.guest_session_id.map(|g| g.into_uuid()))
        .bind(&order.guest_email)
        .bind(order.reseller_id.map(|r| r.into_uuid()))
        .bind(order.status.code())
        .bind(order.subtotal)
        .bind(order.shipping_fee)
        .bind(order.total)
        .bind(&order.shipping.recipient)
        .bind(&order.shipping.phone)
        .bind(&order.shipping.line1)
        .bind(&order.shipping.line2)
        .bind(&order.shipping.city)
        .bind(&order.shipping.province)
        .bind(&order.shipping.postal_code)
        .bind(&order.payment_method)
        .bind(&order.payment_reference)
        .bind(&order.payment_action_url)
        .bind(&order.tracking_number)
        .bind(order.created_at)
        .bind(order.updated_at)
        .bind(order.paid_at)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(&format!(
                "INSERT INTO order_items ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
                ITEM_COLUMNS
            ))
            .bind(order.order_id.as_uuid())
            .bind(item.team_id.as_uuid())
            .bind(item.variant_id.as_uuid())
            .bind(item.size_id.as_uuid())
            .bind(&item.product_name)
            .bind(&item.variant_name)
            .bind(&item.size_label)
            .bind(item.unit_price)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(&format!(
            "DELETE FROM cart_items ci USING carts c WHERE ci.cart_id = c.cart_id AND c.{column} = $1"
        ))
        .bind(key)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(order)
    }

    async fn attach_payment(
        &self,
        order: &Order,
        reference: &str,
        action_url: Option<&str>,
    ) -> CommerceResult<()> {
        sqlx::query(
            r#"
            UPDATE orders
            SET payment_reference = $2, payment_action_url = $3, updated_at = now()
            WHERE order_id = $1
            "#,
        )
        .bind(order.order_id.as_uuid())
        .bind(reference)
        .bind(action_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_code(&self, order_code: &str) -> CommerceResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders WHERE order_code = $1",
            ORDER_COLUMNS
        ))
        .bind(order_code)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_items(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_for_tracking(
        &self,
        order_code: &str,
        email: &str,
    ) -> CommerceResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {} FROM orders
            WHERE order_code = $1
              AND (
                lower(guest_email) = lower($2)
                OR EXISTS (
                    SELECT 1 FROM users u
                    WHERE u.user_id = orders.user_id AND lower(u.email) = lower($2)
                )
              )
            "#,
            ORDER_COLUMNS
        ))
        .bind(order_code)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.with_items(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn orders_of(&self, user_id: &UserId, params: &PageParams) -> CommerceResult<Page<Order>> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_one(&self.pool)
            .await?;

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {} FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, order_id
            LIMIT $2 OFFSET $3
            "#,
            ORDER_COLUMNS
        ))
        .bind(user_id.as_uuid())
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(self.with_items(rows).await?, params, total))
    }

    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        params: &PageParams,
    ) -> CommerceResult<Page<Order>> {
        let status = status.map(|s| s.code());

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE $1::text IS NULL OR status = $1",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {} FROM orders
            WHERE $1::text IS NULL OR status = $1
            ORDER BY created_at DESC, order_id
            LIMIT $2 OFFSET $3
            "#,
            ORDER_COLUMNS
        ))
        .bind(status)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(self.with_items(rows).await?, params, total))
    }

    async fn change_status(
        &self,
        order_code: &str,
        next: OrderStatus,
        tracking_number: Option<String>,
        tolerate_same: bool,
    ) -> CommerceResult<(Order, StatusChange)> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders WHERE order_code = $1 FOR UPDATE",
            ORDER_COLUMNS
        ))
        .bind(order_code)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CommerceError::OrderNotFound)?;

        let order_id = row.order_id;
        let mut items = Self::load_items(&mut *tx, &[order_id]).await?;
        let mut order = row.into_order(items.remove(&order_id).unwrap_or_default())?;
        let change = order.change_status(next, tracking_number, tolerate_same)?;

        if let StatusChange::Applied { restock } = change {
            sqlx::query(
                r#"
                UPDATE orders
                SET status = $2, tracking_number = $3, paid_at = $4, updated_at = $5
                WHERE order_id = $1
                "#,
            )
            .bind(order.order_id.as_uuid())
            .bind(order.status.code())
            .bind(&order.tracking_number)
            .bind(order.paid_at)
            .bind(order.updated_at)
            .execute(&mut *tx)
            .await?;

            if restock {
                Self::restock(&mut tx, &order.items).await?;
            }
        }

        tx.commit().await?;
        Ok((order, change))
    }
}

// ============================================================================
// Address Book Implementation
// ============================================================================

impl AddressBook for PgCommerceRepository {
    async fn find_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
    ) -> CommerceResult<Option<ShippingAddress>> {
        let row = sqlx::query_as::<_, AddressRow>(
            r#"
            SELECT recipient, phone, line1, line2, city, province, postal_code
            FROM addresses
            WHERE address_id = $1 AND user_id = $2
            "#,
        )
        .bind(address_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AddressRow::into_address))
    }
}

// ============================================================================
// Rows
// ============================================================================

#[derive(sqlx::FromRow)]
struct CartItemRow {
    variant_id: Uuid,
    size_id: Uuid,
    quantity: i32,
}

impl CartItemRow {
    fn into_item(self) -> CartItem {
        CartItem {
            variant_id: VariantId::from_uuid(self.variant_id),
            size_id: SizeId::from_uuid(self.size_id),
            quantity: self.quantity,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CartLineRow {
    variant_id: Uuid,
    size_id: Uuid,
    quantity: i32,
    product_id: Uuid,
    team_id: Uuid,
    product_name: String,
    product_slug: String,
    is_active: bool,
    variant_name: String,
    size_label: String,
    stock: i32,
    unit_price: Decimal,
}

impl CartLineRow {
    fn into_line(self) -> CartLine {
        CartLine {
            variant_id: VariantId::from_uuid(self.variant_id),
            size_id: SizeId::from_uuid(self.size_id),
            product_id: ProductId::from_uuid(self.product_id),
            team_id: TeamId::from_uuid(self.team_id),
            product_name: self.product_name,
            product_slug: self.product_slug,
            variant_name: self.variant_name,
            size_label: self.size_label,
            unit_price: self.unit_price,
            quantity: self.quantity,
            stock: self.stock,
            is_active: self.is_active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    order_id: Uuid,
    order_code: String,
    user_id: Option<Uuid>,
    guest_session_id: Option<Uuid>,
    guest_email: Option<String>,
    reseller_id: Option<Uuid>,
    status: String,
    subtotal: Decimal,
    shipping_fee: Decimal,
    total: Decimal,
    ship_recipient: String,
    ship_phone: String,
    ship_line1: String,
    ship_line2: Option<String>,
    ship_city: String,
    ship_province: String,
    ship_postal_code: String,
    payment_method: String,
    payment_reference: Option<String>,
    payment_action_url: Option<String>,
    tracking_number: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    paid_at: Option<DateTime<Utc>>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> CommerceResult<Order> {
        let status = OrderStatus::from_code(&self.status).ok_or_else(|| {
            CommerceError::Internal(format!("Unknown order status in database: {}", self.status))
        })?;
        Ok(Order {
            order_id: OrderId::from_uuid(self.order_id),
            order_code: self.order_code,
            user_id: self.user_id.map(UserId::from_uuid),
            guest_session_id: self.guest_session_id.map(GuestSessionId::from_uuid),
            guest_email: self.guest_email,
            reseller_id: self.reseller_id.map(ResellerId::from_uuid),
            status,
            subtotal: self.subtotal,
            shipping_fee: self.shipping_fee,
            total: self.total,
            shipping: ShippingAddress {
                recipient: self.ship_recipient,
                phone: self.ship_phone,
                line1: self.ship_line1,
                line2: self.ship_line2,
                city: self.ship_city,
                province: self.ship_province,
                postal_code: self.ship_postal_code,
            },
            payment_method: self.payment_method,
            payment_reference: self.payment_reference,
            payment_action_url: self.payment_action_url,
            tracking_number: self.tracking_number,
            items,
            created_at: self.created_at,
            updated_at: self.updated_at,
            paid_at: self.paid_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    team_id: Uuid,
    variant_id: Uuid,
    size_id: Uuid,
    product_name: String,
    variant_name: String,
    size_label: String,
    unit_price: Decimal,
    quantity: i32,
}

impl OrderItemRow {
    fn into_item(self) -> OrderItem {
        OrderItem {
            team_id: TeamId::from_uuid(self.team_id),
            variant_id: VariantId::from_uuid(self.variant_id),
            size_id: SizeId::from_uuid(self.size_id),
            product_name: self.product_name,
            variant_name: self.variant_name,
            size_label: self.size_label,
            unit_price: self.unit_price,
            quantity: self.quantity,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AddressRow {
    recipient: String,
    phone: String,
    line1: String,
    line2: Option<String>,
    city: String,
    province: String,
    postal_code: String,
}

impl AddressRow {
    fn into_address(self) -> ShippingAddress {
        ShippingAddress {
            recipient: self.recipient,
            phone: self.phone,
            line1: self.line1,
            line2: self.line2,
            city: self.city,
            province: self.province,
            postal_code: self.postal_code,
        }
    }
}
