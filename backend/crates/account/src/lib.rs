//! Account Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Profiles, addresses, teams and their invariants
//! - `application/` - Use cases and configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Profile read/update and password change
//! - Address book with exactly one default address once any exist
//! - Admin user listing and global role changes
//! - Teams and team members with owner/admin/member roles

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AccountConfig;
pub use domain::value_object::team_role::TeamRole;
pub use error::{AccountError, AccountResult};
pub use infra::postgres::PgAccountRepository;
pub use presentation::router::{account_router, account_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
