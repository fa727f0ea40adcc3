//! Commerce Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Cart, order, status machine, payment values, repository traits, ports
//! - `application/` - Cart, checkout, order and payment webhook use cases
//! - `infra/` - Database implementations, payment provider client, referral adapter
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Features
//! - Carts for signed-in users and guest checkout sessions
//! - Guest cart merged into the user's cart on login/register
//! - Checkout locks stock rows, snapshots prices and creates a payment intent
//! - Order status machine with restock on cancel/expire/refund
//! - Payment webhook authenticated by a shared callback token, idempotent
//! - Reseller commission credited when an order becomes paid

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{CartMergeService, CommerceConfig};
pub use error::{CommerceError, CommerceResult};
pub use infra::{
    HttpPaymentGateway, PaymentGatewayConfig, PgCommerceRepository, ResellerReferralProgram,
};
pub use presentation::router::{
    PgReferralProgram, cart_router, cart_router_generic, order_router, order_router_generic,
    payment_router, payment_router_generic,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
