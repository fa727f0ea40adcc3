//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{AddressId, SizeId, VariantId};
use kernel::pagination::PageParams;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::checkout::{AddressChoice, CheckoutInput};
use crate::application::payment::PaymentCallback;
use crate::domain::entity::cart::{CartLine, CartView};
use crate::domain::entity::order::{Order, OrderItem, ShippingAddress};
use crate::domain::value_object::order_status::OrderStatus;
use crate::domain::value_object::payment::{PaymentMethod, PaymentStatus};
use crate::error::{CommerceError, CommerceResult};

// ============================================================================
// Cart
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub variant_id: VariantId,
    pub size_id: SizeId,
    #[validate(range(min = 0, max = 99))]
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub product_id: String,
    pub product_name: String,
    pub product_slug: String,
    pub variant_id: String,
    pub variant_name: String,
    pub size_id: String,
    pub size_label: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
    pub stock: i32,
    pub available: bool,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            line_total: line.line_total(),
            available: line.is_available(),
            product_id: line.product_id.to_string(),
            product_name: line.product_name,
            product_slug: line.product_slug,
            variant_id: line.variant_id.to_string(),
            variant_name: line.variant_name,
            size_id: line.size_id.to_string(),
            size_label: line.size_label,
            unit_price: line.unit_price,
            quantity: line.quantity,
            stock: line.stock,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub item_count: i32,
    pub subtotal: Decimal,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        Self {
            item_count: view.item_count(),
            subtotal: view.subtotal,
            items: view.lines.into_iter().map(CartLineResponse::from).collect(),
        }
    }
}

// ============================================================================
// Checkout
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressDto {
    #[validate(length(min = 1, max = 120))]
    pub recipient: String,
    #[validate(custom(function = "platform::validation::validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1, max = 255))]
    pub line1: String,
    #[validate(length(max = 255))]
    pub line2: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub city: String,
    #[validate(length(min = 1, max = 120))]
    pub province: String,
    #[validate(length(min = 3, max = 10))]
    pub postal_code: String,
}

impl From<ShippingAddressDto> for ShippingAddress {
    fn from(a: ShippingAddressDto) -> Self {
        Self {
            recipient: a.recipient.trim().to_string(),
            phone: a.phone,
            line1: a.line1.trim().to_string(),
            line2: a
                .line2
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty()),
            city: a.city.trim().to_string(),
            province: a.province.trim().to_string(),
            postal_code: a.postal_code.trim().to_string(),
        }
    }
}

impl From<ShippingAddress> for ShippingAddressDto {
    fn from(a: ShippingAddress) -> Self {
        Self {
            recipient: a.recipient,
            phone: a.phone,
            line1: a.line1,
            line2: a.line2,
            city: a.city,
            province: a.province,
            postal_code: a.postal_code,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub address_id: Option<AddressId>,
    #[validate(nested)]
    pub address: Option<ShippingAddressDto>,
    #[validate(email)]
    pub email: Option<String>,
    pub payment_method: PaymentMethod,
    #[validate(length(max = 32))]
    pub reseller_code: Option<String>,
}

impl CheckoutRequest {
    /// Exactly one of `addressId` and `address`
    pub fn into_input(self) -> CommerceResult<CheckoutInput> {
        let address = match (self.address_id, self.address) {
            (Some(id), None) => AddressChoice::Saved(id),
            (None, Some(address)) => AddressChoice::Inline(address.into()),
            _ => {
                return Err(CommerceError::Validation(
                    "Provide either addressId or address".to_string(),
                ));
            }
        };
        Ok(CheckoutInput {
            address,
            email: self.email,
            payment_method: self.payment_method,
            reseller_code: self.reseller_code,
        })
    }
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub variant_id: String,
    pub size_id: String,
    pub product_name: String,
    pub variant_name: String,
    pub size_label: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub line_total: Decimal,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            line_total: item.line_total(),
            variant_id: item.variant_id.to_string(),
            size_id: item.size_id.to_string(),
            product_name: item.product_name,
            variant_name: item.variant_name,
            size_label: item.size_label,
            unit_price: item.unit_price,
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
    pub order_code: String,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub total: Decimal,
    pub shipping_address: ShippingAddressDto,
    pub guest_email: Option<String>,
    pub payment_method: String,
    pub payment_action_url: Option<String>,
    pub tracking_number: Option<String>,
    pub items: Vec<OrderItemResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            order_id: o.order_id.to_string(),
            order_code: o.order_code,
            status: o.status,
            subtotal: o.subtotal,
            shipping_fee: o.shipping_fee,
            total: o.total,
            shipping_address: o.shipping.into(),
            guest_email: o.guest_email,
            payment_method: o.payment_method,
            payment_action_url: o.payment_action_url,
            tracking_number: o.tracking_number,
            items: o.items.into_iter().map(OrderItemResponse::from).collect(),
            created_at: o.created_at,
            updated_at: o.updated_at,
            paid_at: o.paid_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub status: Option<OrderStatus>,
}

impl OrderListQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TrackQuery {
    #[validate(length(min = 1, max = 32))]
    pub code: String,
    #[validate(email)]
    pub email: String,
}

/// Public tracking view; no address or buyer details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub order_code: String,
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<Order> for TrackingResponse {
    fn from(o: Order) -> Self {
        Self {
            order_code: o.order_code,
            status: o.status,
            tracking_number: o.tracking_number,
            created_at: o.created_at,
            updated_at: o.updated_at,
            paid_at: o.paid_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    pub status: OrderStatus,
    #[validate(length(min = 1, max = 100))]
    pub tracking_number: Option<String>,
}

// ============================================================================
// Payment
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WebhookRequest {
    /// Order code
    #[validate(length(min = 1, max = 32))]
    pub reference_id: String,
    /// Provider payment id
    #[validate(length(min = 1, max = 255))]
    pub id: String,
    pub status: PaymentStatus,
}

impl From<WebhookRequest> for PaymentCallback {
    fn from(req: WebhookRequest) -> Self {
        Self {
            reference_id: req.reference_id,
            payment_id: req.id,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookResponse {
    pub order_code: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusResponse {
    pub order_code: String,
    pub status: OrderStatus,
    pub payment_method: String,
    pub total: Decimal,
    pub action_url: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<Order> for PaymentStatusResponse {
    fn from(o: Order) -> Self {
        Self {
            order_code: o.order_code,
            status: o.status,
            payment_method: o.payment_method,
            total: o.total,
            action_url: o.payment_action_url,
            paid_at: o.paid_at,
        }
    }
}
