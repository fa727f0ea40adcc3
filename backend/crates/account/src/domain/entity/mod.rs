pub mod address;
pub mod profile;
pub mod team;
