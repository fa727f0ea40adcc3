//! Application Layer
//!
//! Use cases and application services.

pub mod address;
pub mod admin;
pub mod config;
pub mod profile;
pub mod team;

// Re-exports
pub use address::AddressBookUseCase;
pub use admin::AdminUsersUseCase;
pub use config::AccountConfig;
pub use profile::{ChangePasswordUseCase, ProfileUseCase};
pub use team::TeamUseCase;
