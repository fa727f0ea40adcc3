//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, rate limiting and router.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod rate_limit;
pub mod router;

pub use extractors::{AdminUser, CartOwner, CurrentUser};
pub use handlers::AuthAppState;
pub use router::{auth_router, auth_router_generic};
