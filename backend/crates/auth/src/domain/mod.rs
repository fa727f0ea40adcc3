//! Domain Layer
//!
//! Contains entities, value objects, repository traits and outbound ports.

pub mod entity;
pub mod port;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::User;
pub use port::CartMerger;
pub use repository::UserRepository;
