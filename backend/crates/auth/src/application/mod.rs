//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod guest;
pub mod login;
pub mod register;
pub mod session;

// Re-exports
pub use config::AuthConfig;
pub use guest::{GuestSessionOutput, IssueGuestSessionUseCase};
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use session::{AuthOutput, SessionInfo, merge_guest_cart};
