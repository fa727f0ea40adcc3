//! Reseller Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Reseller profile, ledger, withdrawals, repository traits
//! - `application/` - Registration, commission credit, withdrawal use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers
//!
//! ## Features
//! - Customers register as resellers and receive a referral code
//! - Commission on paid orders, credited at most once per order
//! - Withdrawals debit the balance under a row lock; the balance never goes negative
//! - Admin approval or rejection; rejection refunds the amount

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{CommissionUseCase, ResellerConfig};
pub use error::{ResellerError, ResellerResult};
pub use infra::postgres::PgResellerRepository;
pub use presentation::router::{
    reseller_router, reseller_router_generic, withdraw_router, withdraw_router_generic,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
