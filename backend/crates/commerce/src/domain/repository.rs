//! Repository Traits

use auth::CartOwner;
use kernel::id::{AddressId, GuestSessionId, SizeId, UserId, VariantId};
use kernel::pagination::{Page, PageParams};

use crate::domain::entity::cart::{CartItem, CartLine, SizeStock};
use crate::domain::entity::order::{Order, OrderDraft, ShippingAddress, StatusChange};
use crate::domain::value_object::order_status::OrderStatus;
use crate::error::CommerceResult;

#[trait_variant::make(CartRepository: Send)]
pub trait LocalCartRepository {
    /// Lines of the owner's cart joined with current prices and stock
    async fn cart_lines(&self, owner: &CartOwner) -> CommerceResult<Vec<CartLine>>;

    /// `None` when the size does not exist or is not a size of `variant_id`
    async fn size_stock(
        &self,
        variant_id: &VariantId,
        size_id: &SizeId,
    ) -> CommerceResult<Option<SizeStock>>;

    /// Current quantity of a line, 0 when absent
    async fn item_quantity(
        &self,
        owner: &CartOwner,
        variant_id: &VariantId,
        size_id: &SizeId,
    ) -> CommerceResult<i32>;

    /// Insert or overwrite a line, creating the cart on first use
    async fn put_item(&self, owner: &CartOwner, item: &CartItem) -> CommerceResult<()>;

    async fn remove_item(
        &self,
        owner: &CartOwner,
        variant_id: &VariantId,
        size_id: &SizeId,
    ) -> CommerceResult<bool>;

    async fn clear_cart(&self, owner: &CartOwner) -> CommerceResult<()>;

    /// Fold the guest cart into the user's cart and delete it, in one transaction.
    /// Returns the number of lines taken from the guest cart.
    async fn merge_guest_cart(
        &self,
        guest_session_id: &GuestSessionId,
        user_id: &UserId,
        max_line_quantity: i32,
    ) -> CommerceResult<usize>;
}

#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Lock the cart's size rows, price them through `draft`, decrement stock,
    /// insert the order and clear the cart, in one transaction
    async fn place_order(&self, draft: OrderDraft) -> CommerceResult<Order>;

    async fn attach_payment(
        &self,
        order: &Order,
        reference: &str,
        action_url: Option<&str>,
    ) -> CommerceResult<()>;

    async fn find_by_code(&self, order_code: &str) -> CommerceResult<Option<Order>>;

    /// Order whose guest email or owner's account email matches, case-insensitively
    async fn find_for_tracking(
        &self,
        order_code: &str,
        email: &str,
    ) -> CommerceResult<Option<Order>>;

    /// Newest first
    async fn orders_of(&self, user_id: &UserId, params: &PageParams) -> CommerceResult<Page<Order>>;

    /// Newest first
    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
        params: &PageParams,
    ) -> CommerceResult<Page<Order>>;

    /// Apply a status change under the order row lock, restocking when the
    /// new status requires it
    async fn change_status(
        &self,
        order_code: &str,
        next: OrderStatus,
        tracking_number: Option<String>,
        tolerate_same: bool,
    ) -> CommerceResult<(Order, StatusChange)>;
}

/// Saved addresses owned by the account context
#[trait_variant::make(AddressBook: Send)]
pub trait LocalAddressBook {
    async fn find_address(
        &self,
        user_id: &UserId,
        address_id: &AddressId,
    ) -> CommerceResult<Option<ShippingAddress>>;
}
