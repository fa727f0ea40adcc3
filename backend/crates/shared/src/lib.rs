//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of storefront vocabulary:
//! - Common error types and result aliases
//! - Typed entity IDs shared by every bounded context
//! - Pagination parameters and pages
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod pagination;
