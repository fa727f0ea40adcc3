//! Outbound ports
//!
//! Implemented by other bounded contexts and injected into the auth router.

use kernel::error::app_error::AppResult;
use kernel::id::{GuestSessionId, UserId};

/// Moves a guest cart into a user's cart (implemented by commerce)
#[trait_variant::make(CartMerger: Send)]
pub trait LocalCartMerger {
    /// Returns the number of lines that ended up in the user's cart from the
    /// guest cart. A missing guest cart is not an error.
    async fn merge_guest_cart(
        &self,
        guest_session_id: GuestSessionId,
        user_id: UserId,
    ) -> AppResult<usize>;
}

/// Merger for deployments and tests without a cart
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCartMerger;

impl CartMerger for NoopCartMerger {
    async fn merge_guest_cart(
        &self,
        _guest_session_id: GuestSessionId,
        _user_id: UserId,
    ) -> AppResult<usize> {
        Ok(0)
    }
}
