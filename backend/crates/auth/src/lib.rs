//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits, cart-merge port
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, extractors, rate limiting, router
//!
//! ## Features
//! - Register / login with email + password
//! - Stateless `auth_token` cookie (signed JWT carrying the role)
//! - Anonymous `checkout_token` cookie for guest carts and guest checkout
//! - Guest cart merged into the user's cart on login/register
//! - Role gates for customer, reseller and admin routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Same error for unknown email and wrong password
//! - Per-identity fixed-window rate limits

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::port::{CartMerger, NoopCartMerger};
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::extractors::{AdminUser, CartOwner, CurrentUser};
pub use presentation::rate_limit::{RateLimitPolicy, RateLimiter, rate_limit};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
