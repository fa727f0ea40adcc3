//! HTTP Handlers

use std::sync::Arc;

use auth::{AdminUser, CartOwner, CurrentUser};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderName, StatusCode};
use axum::response::IntoResponse;
use kernel::id::{SizeId, VariantId};
use platform::validation::ValidatedJson;
use validator::Validate;

use crate::application::config::CommerceConfig;
use crate::application::{CartUseCase, CheckoutUseCase, OrderUseCase, PaymentWebhookUseCase};
use crate::domain::port::{PaymentGateway, ReferralProgram};
use crate::domain::repository::{AddressBook, CartRepository, OrderRepository};
use crate::error::{CommerceError, CommerceResult};
use crate::presentation::dto::*;

pub const X_CALLBACK_TOKEN: HeaderName = HeaderName::from_static("x-callback-token");

/// Shared state for cart handlers
#[derive(Clone)]
pub struct CartAppState<R>
where
    R: CartRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CommerceConfig>,
}

impl<R> CartAppState<R>
where
    R: CartRepository + Clone + Send + Sync + 'static,
{
    fn cart(&self) -> CartUseCase<R> {
        CartUseCase::new(self.repo.clone(), self.config.clone())
    }
}

/// Shared state for order and payment handlers
pub struct CommerceAppState<R, G, P>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub gateway: Arc<G>,
    pub referrals: Arc<P>,
    pub config: Arc<CommerceConfig>,
}

// G and P need not be Clone
impl<R, G, P> Clone for CommerceAppState<R, G, P>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            gateway: self.gateway.clone(),
            referrals: self.referrals.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, G, P> CommerceAppState<R, G, P>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    fn orders(&self) -> OrderUseCase<R, P> {
        OrderUseCase::new(self.repo.clone(), self.referrals.clone())
    }
}

// ============================================================================
// Cart
// ============================================================================

/// GET /api/v1/cart
pub async fn view_cart<R>(
    State(state): State<CartAppState<R>>,
    owner: CartOwner,
) -> CommerceResult<impl IntoResponse>
where
    R: CartRepository + Clone + Send + Sync + 'static,
{
    let view = state.cart().view(&owner).await?;
    Ok(Json(CartResponse::from(view)))
}

/// POST /api/v1/cart/items
pub async fn add_item<R>(
    State(state): State<CartAppState<R>>,
    owner: CartOwner,
    ValidatedJson(req): ValidatedJson<CartItemRequest>,
) -> CommerceResult<impl IntoResponse>
where
    R: CartRepository + Clone + Send + Sync + 'static,
{
    let view = state
        .cart()
        .add_item(&owner, req.variant_id, req.size_id, req.quantity)
        .await?;
    Ok(Json(CartResponse::from(view)))
}

/// PATCH /api/v1/cart/items
pub async fn update_item<R>(
    State(state): State<CartAppState<R>>,
    owner: CartOwner,
    ValidatedJson(req): ValidatedJson<CartItemRequest>,
) -> CommerceResult<impl IntoResponse>
where
    R: CartRepository + Clone + Send + Sync + 'static,
{
    let view = state
        .cart()
        .update_item(&owner, req.variant_id, req.size_id, req.quantity)
        .await?;
    Ok(Json(CartResponse::from(view)))
}

/// DELETE /api/v1/cart/items/{variantId}/{sizeId}
pub async fn remove_item<R>(
    State(state): State<CartAppState<R>>,
    owner: CartOwner,
    Path((variant_id, size_id)): Path<(VariantId, SizeId)>,
) -> CommerceResult<impl IntoResponse>
where
    R: CartRepository + Clone + Send + Sync + 'static,
{
    let view = state.cart().remove_item(&owner, variant_id, size_id).await?;
    Ok(Json(CartResponse::from(view)))
}

/// DELETE /api/v1/cart
pub async fn clear_cart<R>(
    State(state): State<CartAppState<R>>,
    owner: CartOwner,
) -> CommerceResult<impl IntoResponse>
where
    R: CartRepository + Clone + Send + Sync + 'static,
{
    state.cart().clear(&owner).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Orders
// ============================================================================

/// POST /api/v1/order/checkout
pub async fn checkout<R, G, P>(
    State(state): State<CommerceAppState<R, G, P>>,
    owner: CartOwner,
    ValidatedJson(req): ValidatedJson<CheckoutRequest>,
) -> CommerceResult<impl IntoResponse>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    let input = req.into_input()?;
    let order = CheckoutUseCase::new(
        state.repo.clone(),
        state.gateway.clone(),
        state.referrals.clone(),
        state.config.clone(),
    )
    .execute(owner, input)
    .await?;
    Ok((StatusCode::CREATED, Json(OrderResponse::from(order))))
}

/// GET /api/v1/order
pub async fn my_orders<R, G, P>(
    State(state): State<CommerceAppState<R, G, P>>,
    user: CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> CommerceResult<impl IntoResponse>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    let page = state
        .orders()
        .mine(&user.user_id, &query.page_params())
        .await?;
    Ok(Json(page.map(OrderResponse::from)))
}

/// GET /api/v1/order/{code}
pub async fn order_detail<R, G, P>(
    State(state): State<CommerceAppState<R, G, P>>,
    user: CurrentUser,
    Path(code): Path<String>,
) -> CommerceResult<impl IntoResponse>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    let order = state.orders().detail(&user, &code).await?;
    Ok(Json(OrderResponse::from(order)))
}

/// GET /api/v1/order/track?code&email
pub async fn track<R, G, P>(
    State(state): State<CommerceAppState<R, G, P>>,
    Query(query): Query<TrackQuery>,
) -> CommerceResult<impl IntoResponse>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    query
        .validate()
        .map_err(|e| CommerceError::Validation(e.to_string()))?;
    let order = state.orders().track(&query.code, &query.email).await?;
    Ok(Json(TrackingResponse::from(order)))
}

/// GET /api/v1/order/admin?status&page
pub async fn admin_orders<R, G, P>(
    State(state): State<CommerceAppState<R, G, P>>,
    _admin: AdminUser,
    Query(query): Query<OrderListQuery>,
) -> CommerceResult<impl IntoResponse>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    let page = state
        .orders()
        .list(query.status, &query.page_params())
        .await?;
    Ok(Json(page.map(OrderResponse::from)))
}

/// PATCH /api/v1/order/{code}/status
pub async fn change_status<R, G, P>(
    State(state): State<CommerceAppState<R, G, P>>,
    _admin: AdminUser,
    Path(code): Path<String>,
    ValidatedJson(req): ValidatedJson<StatusChangeRequest>,
) -> CommerceResult<impl IntoResponse>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    let order = state
        .orders()
        .set_status(&code, req.status, req.tracking_number)
        .await?;
    Ok(Json(OrderResponse::from(order)))
}

/// POST /api/v1/order/{code}/cancel
pub async fn cancel_order<R, G, P>(
    State(state): State<CommerceAppState<R, G, P>>,
    owner: CartOwner,
    Path(code): Path<String>,
) -> CommerceResult<impl IntoResponse>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    let order = state.orders().cancel(&owner, &code).await?;
    Ok(Json(OrderResponse::from(order)))
}

// ============================================================================
// Payment
// ============================================================================

/// POST /api/v1/payment/webhook
pub async fn payment_webhook<R, G, P>(
    State(state): State<CommerceAppState<R, G, P>>,
    headers: HeaderMap,
    ValidatedJson(req): ValidatedJson<WebhookRequest>,
) -> CommerceResult<impl IntoResponse>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    let token = headers
        .get(&X_CALLBACK_TOKEN)
        .and_then(|v| v.to_str().ok());
    let order = PaymentWebhookUseCase::new(
        state.repo.clone(),
        state.referrals.clone(),
        state.config.clone(),
    )
    .handle(token, req.into())
    .await?;
    Ok(Json(WebhookResponse {
        order_code: order.order_code,
        status: order.status,
    }))
}

/// GET /api/v1/payment/{code}
pub async fn payment_status<R, G, P>(
    State(state): State<CommerceAppState<R, G, P>>,
    owner: CartOwner,
    Path(code): Path<String>,
) -> CommerceResult<impl IntoResponse>
where
    R: OrderRepository + AddressBook + Clone + Send + Sync + 'static,
    G: PaymentGateway + Send + Sync + 'static,
    P: ReferralProgram + Send + Sync + 'static,
{
    let order = state.orders().owned(&owner, &code).await?;
    Ok(Json(PaymentStatusResponse::from(order)))
}
