//! Domain Layer
//!
//! Profiles, address book and team membership rules.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::address::{Address, AddressDraft};
pub use entity::profile::Profile;
pub use entity::team::{Team, TeamMember, TeamMembership};
pub use repository::{AddressRepository, ProfileRepository, TeamRepository};
pub use value_object::team_role::TeamRole;
